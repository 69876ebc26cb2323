pub mod admin_tabs;
pub mod layout;
pub mod load_error;
pub mod pagination_controls;
pub mod require_admin;
pub mod stats_tiles;
pub mod toast;
pub mod wine_card;
pub mod wine_filters;
pub mod winery_card;

pub use admin_tabs::AdminTabs;
pub use load_error::LoadError;
pub use pagination_controls::PaginationControls;
pub use require_admin::RequireAdmin;
pub use stats_tiles::StatsTiles;
pub use toast::ToastContainer;
pub use wine_card::WineCard;
pub use wine_filters::WineFilterPanel;
pub use winery_card::WineryCard;
