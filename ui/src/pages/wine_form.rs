use payloads::filters::parse_winery_id;
use payloads::requests::{
    CreateWine, UpdateWine, VARIETY_MAX_LEN, validate_wine_name,
};
use payloads::{DEFAULT_BOTTLE_SIZE, Vintage, Wine, WineId, WineStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::AdminRoute;
use crate::contexts::{use_session, use_toast};
use crate::hooks::{use_title, use_wineries};
use crate::moderation::{DraftError, non_blank, parse_price_field};
use crate::utils::describe_error;

const INPUT: &str = "w-full px-3 py-2 border border-stone-300 rounded-md \
                     shadow-sm bg-white text-stone-900 focus:outline-none \
                     focus:ring-2 focus:ring-rose-700";
const LABEL: &str = "block text-sm font-medium text-stone-700 mb-1";

/// Raw input for every wine field, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineForm {
    pub winery_id: String,
    pub name: String,
    pub variety: String,
    pub vintage: String,
    pub price: String,
    pub description: String,
    pub product_url: String,
    pub image_url: String,
    pub alcohol_content: String,
    pub bottle_size: String,
    pub is_available: bool,
}

impl Default for WineForm {
    fn default() -> Self {
        Self {
            winery_id: String::new(),
            name: String::new(),
            variety: String::new(),
            vintage: String::new(),
            price: String::new(),
            description: String::new(),
            product_url: String::new(),
            image_url: String::new(),
            alcohol_content: String::new(),
            bottle_size: DEFAULT_BOTTLE_SIZE.to_string(),
            is_available: true,
        }
    }
}

impl From<&Wine> for WineForm {
    fn from(wine: &Wine) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            winery_id: wine.winery.id.to_string(),
            name: wine.name.clone(),
            variety: text(&wine.variety),
            vintage: wine
                .vintage
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            price: wine.price.map(|p| p.to_string()).unwrap_or_default(),
            description: text(&wine.description),
            product_url: text(&wine.product_url),
            image_url: text(&wine.image_url),
            alcohol_content: text(&wine.alcohol_content),
            bottle_size: text(&wine.bottle_size),
            is_available: wine.is_available,
        }
    }
}

impl WineForm {
    /// Every field validated and trimmed. A blank optional field is sent
    /// as `null`, which clears the stored value.
    pub fn to_update(&self) -> Result<UpdateWine, DraftError> {
        let winery_id = parse_winery_id(&self.winery_id)
            .ok_or(DraftError::MissingWinery)?;

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
        let text = |field: &str| Some(non_blank(field).map(str::to_string));

        Ok(UpdateWine {
            winery_id: Some(winery_id),
            name: Some(name.to_string()),
            variety: Some(variety.map(str::to_string)),
            vintage: Some(vintage),
            price: Some(parse_price_field(&self.price)?),
            description: text(&self.description),
            product_url: text(&self.product_url),
            image_url: text(&self.image_url),
            alcohol_content: text(&self.alcohol_content),
            bottle_size: text(&self.bottle_size),
            is_available: Some(self.is_available),
        })
    }

    /// A new wine always starts in the review queue.
    pub fn to_create(&self) -> Result<CreateWine, DraftError> {
        let update = self.to_update()?;
        Ok(CreateWine {
            winery_id: update.winery_id.ok_or(DraftError::MissingWinery)?,
            name: update.name.unwrap_or_default(),
            variety: update.variety.flatten(),
            vintage: update.vintage.flatten(),
            price: update.price.flatten(),
            description: update.description.flatten(),
            product_url: update.product_url.flatten(),
            image_url: update.image_url.flatten(),
            alcohol_content: update.alcohol_content.flatten(),
            bottle_size: update
                .bottle_size
                .flatten()
                .or_else(|| Some(DEFAULT_BOTTLE_SIZE.to_string())),
            is_available: self.is_available,
            status: WineStatus::Pending,
        })
    }
}

enum SaveRequest {
    Create(CreateWine),
    Update(WineId, UpdateWine),
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Winery,
    Name,
    Variety,
    Vintage,
    Price,
    Description,
    ProductUrl,
    ImageUrl,
    AlcoholContent,
    BottleSize,
}

impl Field {
    fn slot(self, form: &mut WineForm) -> &mut String {
        match self {
            Field::Winery => &mut form.winery_id,
            Field::Name => &mut form.name,
            Field::Variety => &mut form.variety,
            Field::Vintage => &mut form.vintage,
            Field::Price => &mut form.price,
            Field::Description => &mut form.description,
            Field::ProductUrl => &mut form.product_url,
            Field::ImageUrl => &mut form.image_url,
            Field::AlcoholContent => &mut form.alcohol_content,
            Field::BottleSize => &mut form.bottle_size,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Edit this wine; create a new one when absent.
    #[prop_or_default]
    pub wine_id: Option<WineId>,
}

#[function_component]
pub fn WineFormPage(props: &Props) -> Html {
    let is_edit = props.wine_id.is_some();
    use_title(if is_edit { "Edit wine" } else { "Add wine" });
    let session = use_session();
    let toasts = use_toast();
    let navigator = use_navigator().unwrap();
    let wineries = use_wineries();

    let form = use_state(WineForm::default);
    let is_loaded = use_state(|| false);
    let load_error = use_state(|| None::<String>);
    let error_message = use_state(|| None::<String>);
    let is_submitting = use_state(|| false);

    {
        let form = form.clone();
        let is_loaded = is_loaded.clone();
        let load_error = load_error.clone();
        let session = session.clone();
        use_effect_with(props.wine_id, move |wine_id| {
            let Some(id) = *wine_id else {
                form.set(WineForm::default());
                is_loaded.set(true);
                return;
            };
            let Some(client) = session.client() else {
                return;
            };
            yew::platform::spawn_local(async move {
                match client.get_wine(id).await {
                    Ok(wine) => form.set(WineForm::from(&wine)),
                    Err(e) => {
                        tracing::error!("Loading wine {id} failed: {e}");
                        load_error.set(Some(describe_error(&e)));
                    }
                }
                is_loaded.set(true);
            });
        });
    }

    let on_text = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            *field.slot(&mut next) = input.value();
            form.set(next);
        })
    };

    let on_select = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            *field.slot(&mut next) = select.value();
            form.set(next);
        })
    };

    let on_textarea = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            *field.slot(&mut next) = area.value();
            form.set(next);
        })
    };

    let on_available = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.is_available = input.checked();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let wine_id = props.wine_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            let request = match wine_id {
                Some(id) => form
                    .to_update()
                    .map(|update| SaveRequest::Update(id, update)),
                None => form.to_create().map(SaveRequest::Create),
            };
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };
            let Some(client) = session.client() else {
                return;
            };

            let navigator = navigator.clone();
            let toasts = toasts.clone();
            let error_message = error_message.clone();
            let is_submitting = is_submitting.clone();
            is_submitting.set(true);
            error_message.set(None);
            yew::platform::spawn_local(async move {
                let result = match &request {
                    SaveRequest::Update(id, update) => client
                        .update_wine(*id, update)
                        .await
                        .map(|response| response.message),
                    SaveRequest::Create(create) => client
                        .create_wine(create)
                        .await
                        .map(|created| created.message),
                };
                is_submitting.set(false);
                match result {
                    Ok(message) => {
                        toasts.success(message);
                        navigator.push(&AdminRoute::Wines);
                    }
                    Err(e) => {
                        tracing::error!("Saving wine failed: {e}");
                        error_message.set(Some(describe_error(&e)));
                    }
                }
            });
        })
    };

    if !*is_loaded {
        return html! {
            <p class="text-center py-12 text-stone-600">{"Loading wine..."}</p>
        };
    }

    if let Some(error) = &*load_error {
        return html! {
            <div class="text-center py-16 space-y-4">
                <p class="text-red-700">{format!("Error loading wine: {error}")}</p>
                <Link<AdminRoute>
                    to={AdminRoute::Wines}
                    classes="text-rose-800 hover:underline"
                >
                    {"Back to wines"}
                </Link<AdminRoute>>
            </div>
        };
    }

    let winery_options = match wineries.data.as_ref() {
        Some(list) => list.clone(),
        None => Vec::new(),
    };

    html! {
        <div class="max-w-2xl space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-stone-900">
                    {if is_edit { "Edit wine" } else { "Add wine" }}
                </h1>
                <Link<AdminRoute>
                    to={AdminRoute::Wines}
                    classes="text-sm text-stone-600 hover:underline"
                >
                    {"Back to wines"}
                </Link<AdminRoute>>
            </div>

            <form onsubmit={on_submit} class="bg-white p-6 rounded-lg border border-stone-200 space-y-5">
                if let Some(error) = &*error_message {
                    <div class="p-4 rounded-md bg-red-50 border border-red-200">
                        <p class="text-sm text-red-700">{error}</p>
                    </div>
                }

                <div>
                    <label for="winery" class={LABEL}>{"Winery"}</label>
                    <select id="winery" class={INPUT} onchange={on_select(Field::Winery)}>
                        <option value="" selected={form.winery_id.is_empty()}>
                            {"Choose a winery"}
                        </option>
                        {for winery_options.iter().map(|winery| {
                            let value = winery.id.to_string();
                            html! {
                                <option
                                    selected={form.winery_id == value}
                                    value={value.clone()}
                                >
                                    {&winery.name}
                                </option>
                            }
                        })}
                    </select>
                </div>

                <div>
                    <label for="name" class={LABEL}>{"Name"}</label>
                    <input id="name" type="text" class={INPUT}
                        value={form.name.clone()}
                        onchange={on_text(Field::Name)} />
                </div>

                <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                    <div>
                        <label for="variety" class={LABEL}>{"Variety"}</label>
                        <input id="variety" type="text" class={INPUT}
                            maxlength={VARIETY_MAX_LEN.to_string()}
                            value={form.variety.clone()}
                            onchange={on_text(Field::Variety)} />
                    </div>
                    <div>
                        <label for="vintage" class={LABEL}>{"Vintage"}</label>
                        <input id="vintage" type="text" class={INPUT}
                            placeholder="2021 or NV"
                            value={form.vintage.clone()}
                            onchange={on_text(Field::Vintage)} />
                    </div>
                    <div>
                        <label for="price" class={LABEL}>{"Price"}</label>
                        <input id="price" type="text" class={INPUT}
                            inputmode="decimal"
                            value={form.price.clone()}
                            onchange={on_text(Field::Price)} />
                    </div>
                </div>

                <div>
                    <label for="description" class={LABEL}>{"Description"}</label>
                    <textarea id="description" rows="4" class={INPUT}
                        value={form.description.clone()}
                        onchange={on_textarea(Field::Description)} />
                </div>

                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    <div>
                        <label for="product-url" class={LABEL}>{"Shop link"}</label>
                        <input id="product-url" type="url" class={INPUT}
                            value={form.product_url.clone()}
                            onchange={on_text(Field::ProductUrl)} />
                    </div>
                    <div>
                        <label for="image-url" class={LABEL}>{"Image link"}</label>
                        <input id="image-url" type="url" class={INPUT}
                            value={form.image_url.clone()}
                            onchange={on_text(Field::ImageUrl)} />
                    </div>
                    <div>
                        <label for="alcohol" class={LABEL}>{"Alcohol"}</label>
                        <input id="alcohol" type="text" class={INPUT}
                            placeholder="13.5%"
                            value={form.alcohol_content.clone()}
                            onchange={on_text(Field::AlcoholContent)} />
                    </div>
                    <div>
                        <label for="bottle-size" class={LABEL}>{"Bottle size"}</label>
                        <input id="bottle-size" type="text" class={INPUT}
                            value={form.bottle_size.clone()}
                            onchange={on_text(Field::BottleSize)} />
                    </div>
                </div>

                <label class="flex items-center gap-2 text-sm text-stone-700">
                    <input type="checkbox"
                        checked={form.is_available}
                        onchange={on_available} />
                    {"Available to buy"}
                </label>

                <div class="flex justify-end gap-3">
                    <button
                        type="submit"
                        disabled={*is_submitting}
                        class="px-4 py-2 rounded-md text-sm font-medium \
                               text-white bg-rose-900 hover:bg-rose-800 \
                               disabled:opacity-50"
                    >
                        {match (*is_submitting, is_edit) {
                            (true, _) => "Saving...",
                            (false, true) => "Save changes",
                            (false, false) => "Add wine",
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::WineryId;
    use rust_decimal::Decimal;

    fn filled() -> WineForm {
        WineForm {
            winery_id: "3".into(),
            name: "  Old Vine Grenache ".into(),
            variety: "Grenache".into(),
            vintage: "2019".into(),
            price: "$32.50".into(),
            ..Default::default()
        }
    }

    #[test]
    fn new_wines_default_to_a_standard_bottle() {
        let form = WineForm::default();
        assert_eq!(form.bottle_size, DEFAULT_BOTTLE_SIZE);
        assert!(form.is_available);
    }

    #[test]
    fn create_request_starts_pending() {
        let create = filled().to_create().unwrap();
        assert_eq!(create.winery_id, WineryId(3));
        assert_eq!(create.name, "Old Vine Grenache");
        assert_eq!(create.vintage, Some(Vintage::Year(2019)));
        assert_eq!(create.price, Some(Decimal::new(3250, 2)));
        assert_eq!(create.bottle_size.as_deref(), Some(DEFAULT_BOTTLE_SIZE));
        assert_eq!(create.status, WineStatus::Pending);
        assert_eq!(create.description, None);
    }

    #[test]
    fn blank_bottle_size_falls_back_on_create() {
        let form = WineForm {
            bottle_size: "  ".into(),
            ..filled()
        };
        assert_eq!(form.to_update().unwrap().bottle_size, Some(None));
        assert_eq!(
            form.to_create().unwrap().bottle_size.as_deref(),
            Some(DEFAULT_BOTTLE_SIZE)
        );
    }

    #[test]
    fn a_winery_is_required() {
        let form = WineForm {
            winery_id: String::new(),
            ..filled()
        };
        assert_eq!(form.to_create(), Err(DraftError::MissingWinery));
    }

    #[test]
    fn update_carries_availability() {
        let form = WineForm {
            is_available: false,
            ..filled()
        };
        let update = form.to_update().unwrap();
        assert_eq!(update.is_available, Some(false));
        assert_eq!(update.winery_id, Some(WineryId(3)));
    }

    #[test]
    fn emptied_fields_clear_the_stored_wine_on_edit() {
        let form = WineForm {
            price: String::new(),
            description: " ".into(),
            ..filled()
        };
        let update = form.to_update().unwrap();
        assert_eq!(update.price, Some(None));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.variety, Some(Some("Grenache".to_string())));
    }
}
