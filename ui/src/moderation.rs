//! Review queue state for the admin moderation page.
//!
//! The board only changes after the backend has confirmed a decision, so a
//! failed request leaves it exactly as it was.

use payloads::filters::parse_price;
use payloads::requests::{UpdateWine, VARIETY_MAX_LEN, validate_wine_name};
use payloads::{
    Decision, StatusCounts, Transition, Vintage, VintageParseError, Wine,
    WineId, WineStatus,
};
use rust_decimal::Decimal;
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationBoard {
    pub pending: Vec<Wine>,
    pub stats: StatusCounts,
    pub editing: Option<WineDraft>,
}

impl ModerationBoard {
    pub fn new(pending: Vec<Wine>, stats: StatusCounts) -> Self {
        Self {
            pending,
            stats,
            editing: None,
        }
    }

    pub fn wine(&self, id: WineId) -> Option<&Wine> {
        self.pending.iter().find(|wine| wine.id == id)
    }

    /// The backend made `id` live.
    pub fn approved(self, id: WineId) -> Self {
        self.decided(id, Transition::To(WineStatus::Live))
    }

    /// The backend rejected and deleted `id`.
    pub fn rejected(self, id: WineId) -> Self {
        self.decided(id, Transition::Removed)
    }

    /// The backend moved pending wine `id` as `transition` describes.
    pub fn decided(mut self, id: WineId, transition: Transition) -> Self {
        let before = self.pending.len();
        self.pending.retain(|wine| wine.id != id);
        if self.pending.len() < before {
            self.stats.record(WineStatus::Pending, transition);
        }
        if self.is_editing(id) {
            self.editing = None;
        }
        self
    }

    /// The backend accepted `update` for `id`.
    pub fn saved(mut self, id: WineId, update: &UpdateWine) -> Self {
        if let Some(wine) = self.pending.iter_mut().find(|w| w.id == id) {
            update.apply_to(wine);
        }
        if self.is_editing(id) {
            self.editing = None;
        }
        self
    }

    pub fn begin_edit(mut self, wine: &Wine) -> Self {
        self.editing = Some(WineDraft::from(wine));
        self
    }

    pub fn cancel_edit(mut self) -> Self {
        self.editing = None;
        self
    }

    pub fn is_editing(&self, id: WineId) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.wine_id == id)
    }
}

/// Question put to the admin before a decision is sent. Decisions that are
/// easy to undo go through without one.
pub fn confirmation_prompt(
    decision: Decision,
    wine_name: &str,
) -> Option<String> {
    match decision {
        Decision::Approve => Some(format!(
            "Approve \"{wine_name}\" and make it live on the public site?"
        )),
        Decision::Reject => Some(format!(
            "Reject and delete \"{wine_name}\"? This cannot be undone."
        )),
        Decision::Archive | Decision::Requeue => None,
    }
}

pub enum BoardAction {
    Loaded {
        pending: Vec<Wine>,
        stats: StatusCounts,
    },
    Decided(WineId, Transition),
    Saved(WineId, UpdateWine),
    BeginEdit(Wine),
    EditDraft(WineDraft),
    CancelEdit,
}

impl Reducible for ModerationBoard {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let board = (*self).clone();
        let next = match action {
            BoardAction::Loaded { pending, stats } => {
                ModerationBoard::new(pending, stats)
            }
            BoardAction::Decided(id, transition) => {
                board.decided(id, transition)
            }
            BoardAction::Saved(id, update) => board.saved(id, &update),
            BoardAction::BeginEdit(wine) => board.begin_edit(&wine),
            BoardAction::EditDraft(draft) => ModerationBoard {
                editing: Some(draft),
                ..board
            },
            BoardAction::CancelEdit => board.cancel_edit(),
        };
        Rc::new(next)
    }
}

/// Editable copy of the fields the review page can change inline.
///
/// Fields hold the raw input text; [`WineDraft::to_update`] validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineDraft {
    pub wine_id: WineId,
    pub name: String,
    pub variety: String,
    pub vintage: String,
    pub price: String,
    pub description: String,
}

impl From<&Wine> for WineDraft {
    fn from(wine: &Wine) -> Self {
        Self {
            wine_id: wine.id,
            name: wine.name.clone(),
            variety: wine.variety.clone().unwrap_or_default(),
            vintage: wine
                .vintage
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            price: wine.price.map(|p| p.to_string()).unwrap_or_default(),
            description: wine.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{0}")]
    InvalidName(&'static str),
    #[error("Variety must be at most {VARIETY_MAX_LEN} characters")]
    VarietyTooLong,
    #[error(transparent)]
    InvalidVintage(#[from] VintageParseError),
    #[error("Price must be a positive amount, got {0:?}")]
    InvalidPrice(String),
    #[error("Please choose a winery")]
    MissingWinery,
}

impl WineDraft {
    /// Update body for the draft. A blank optional field clears the
    /// stored value; fields the draft does not show are left out.
    pub fn to_update(&self) -> Result<UpdateWine, DraftError> {
        let name = self.name.trim();
        if let Some(message) = validate_wine_name(name).error_message() {
            return Err(DraftError::InvalidName(message));
        }

        let variety = non_blank(&self.variety);
        if variety.is_some_and(|v| v.chars().count() > VARIETY_MAX_LEN) {
            return Err(DraftError::VarietyTooLong);
        }

        let vintage = non_blank(&self.vintage)
            .map(str::parse::<Vintage>)
            .transpose()?;

        let price = parse_price_field(&self.price)?;

        Ok(UpdateWine {
            name: Some(name.to_string()),
            variety: Some(variety.map(str::to_string)),
            vintage: Some(vintage),
            price: Some(price),
            description: Some(
                non_blank(&self.description).map(str::to_string),
            ),
            ..Default::default()
        })
    }
}

pub(crate) fn parse_price_field(
    raw: &str,
) -> Result<Option<Decimal>, DraftError> {
    match non_blank(raw) {
        Some(raw) => parse_price(raw)
            .map(Some)
            .ok_or_else(|| DraftError::InvalidPrice(raw.to_string())),
        None => Ok(None),
    }
}

pub(crate) fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::{WineryId, WinerySummary};

    fn wine(id: i64, name: &str) -> Wine {
        Wine {
            id: WineId(id),
            name: name.to_string(),
            variety: Some("Shiraz".into()),
            vintage: Some(Vintage::Year(2021)),
            price: Some(Decimal::new(3500, 2)),
            description: None,
            product_url: None,
            image_url: None,
            alcohol_content: None,
            bottle_size: Some("750ml".into()),
            is_available: true,
            status: WineStatus::Pending,
            winery: WinerySummary {
                id: WineryId(2),
                name: "Valley Floor Cellars".into(),
                slug: "valley-floor-cellars".into(),
            },
            created_at: None,
            updated_at: None,
        }
    }

    fn board() -> ModerationBoard {
        ModerationBoard::new(
            vec![wine(1, "A"), wine(2, "B")],
            StatusCounts {
                pending: 2,
                live: 5,
                archived: 0,
            },
        )
    }

    fn ids(board: &ModerationBoard) -> Vec<i64> {
        board.pending.iter().map(|w| w.id.0).collect()
    }

    #[test]
    fn approve_moves_one_wine_from_pending_to_live() {
        let board = board().approved(WineId(1));
        assert_eq!(ids(&board), vec![2]);
        assert_eq!(board.stats.pending, 1);
        assert_eq!(board.stats.live, 6);
    }

    #[test]
    fn reject_removes_the_wine_and_only_decrements_pending() {
        let board = board().rejected(WineId(2));
        assert_eq!(ids(&board), vec![1]);
        assert_eq!(board.stats.pending, 1);
        assert_eq!(board.stats.live, 5);
        assert_eq!(board.stats.archived, 0);
    }

    #[test]
    fn decision_for_a_wine_not_on_the_board_changes_nothing() {
        let before = board();
        assert_eq!(before.clone().approved(WineId(99)), before);
        assert_eq!(before.clone().rejected(WineId(99)), before);
    }

    #[test]
    fn pending_count_saturates_at_zero() {
        let mut board = board();
        board.stats.pending = 0;
        let board = board.rejected(WineId(1));
        assert_eq!(board.stats.pending, 0);
    }

    #[test]
    fn save_merges_the_update_into_the_listed_wine() {
        let board = board().begin_edit(&wine(2, "B"));
        let update = UpdateWine {
            name: Some("B Reserve".into()),
            price: Some(Some(Decimal::new(4200, 2))),
            ..Default::default()
        };

        let board = board.saved(WineId(2), &update);
        let saved = board.wine(WineId(2)).unwrap();
        assert_eq!(saved.name, "B Reserve");
        assert_eq!(saved.price, Some(Decimal::new(4200, 2)));
        assert_eq!(saved.variety.as_deref(), Some("Shiraz"));
        assert_eq!(board.editing, None);
        assert_eq!(board.stats, self::board().stats);
    }

    #[test]
    fn deciding_the_wine_being_edited_closes_the_editor() {
        let board = board().begin_edit(&wine(1, "A"));
        assert!(board.is_editing(WineId(1)));

        let other = board.clone().approved(WineId(2));
        assert!(other.is_editing(WineId(1)));

        let same = board.approved(WineId(1));
        assert_eq!(same.editing, None);
    }

    #[test]
    fn reducer_applies_actions_to_the_latest_state() {
        let state = Rc::new(board());
        let live = Transition::To(WineStatus::Live);
        let state = state.reduce(BoardAction::Decided(WineId(1), live));
        let state = state.reduce(BoardAction::Decided(WineId(2), live));
        assert!(state.pending.is_empty());
        assert_eq!(state.stats.pending, 0);
        assert_eq!(state.stats.live, 7);
    }

    #[test]
    fn destructive_and_publishing_decisions_ask_first() {
        assert_eq!(
            confirmation_prompt(Decision::Approve, "Old Vine Shiraz").unwrap(),
            "Approve \"Old Vine Shiraz\" and make it live on the public site?"
        );
        assert_eq!(
            confirmation_prompt(Decision::Reject, "Estate GSM").unwrap(),
            "Reject and delete \"Estate GSM\"? This cannot be undone."
        );
        assert_eq!(confirmation_prompt(Decision::Requeue, "A"), None);
    }

    #[test]
    fn draft_starts_from_the_wine_fields() {
        let draft = WineDraft::from(&wine(1, "A"));
        assert_eq!(draft.name, "A");
        assert_eq!(draft.variety, "Shiraz");
        assert_eq!(draft.vintage, "2021");
        assert_eq!(draft.price, "35.00");
        assert_eq!(draft.description, "");
    }

    #[test]
    fn blanking_a_draft_field_clears_it_on_save() {
        let board = board().begin_edit(&wine(2, "B"));
        let mut draft = WineDraft::from(&wine(2, "B"));
        draft.price = "  ".into();
        draft.variety = String::new();

        let update = draft.to_update().unwrap();
        let board = board.saved(WineId(2), &update);
        let saved = board.wine(WineId(2)).unwrap();
        assert_eq!(saved.price, None);
        assert_eq!(saved.variety, None);
        assert_eq!(saved.vintage, Some(Vintage::Year(2021)));
    }

    #[test]
    fn draft_produces_a_partial_update() {
        let mut draft = WineDraft::from(&wine(1, "A"));
        draft.name = "  Old Vine Shiraz ".into();
        draft.vintage = "nv".into();
        draft.price = "$48.50".into();

        let update = draft.to_update().unwrap();
        assert_eq!(update.name.as_deref(), Some("Old Vine Shiraz"));
        assert_eq!(update.vintage, Some(Some(Vintage::NonVintage)));
        assert_eq!(update.price, Some(Some(Decimal::new(4850, 2))));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.winery_id, None);
        assert_eq!(update.bottle_size, None);
    }

    #[test]
    fn draft_validation_reports_the_first_bad_field() {
        let mut draft = WineDraft::from(&wine(1, "A"));
        draft.name = "   ".into();
        assert_eq!(
            draft.to_update(),
            Err(DraftError::InvalidName("Wine name is required"))
        );

        draft.name = "A".into();
        draft.variety = "x".repeat(VARIETY_MAX_LEN + 1);
        assert_eq!(draft.to_update(), Err(DraftError::VarietyTooLong));

        draft.variety = "Shiraz".into();
        draft.price = "cheap".into();
        assert_eq!(
            draft.to_update(),
            Err(DraftError::InvalidPrice("cheap".into()))
        );

        draft.price = String::new();
        draft.vintage = "21".into();
        assert!(matches!(
            draft.to_update(),
            Err(DraftError::InvalidVintage(_))
        ));
    }
}
