pub mod admin_login;
pub mod admin_review;
pub mod admin_wines;
pub mod home;
pub mod not_found;
pub mod wine_form;
pub mod wineries;
pub mod winery_detail;
pub mod wines;

pub use admin_login::AdminLoginPage;
pub use admin_review::AdminReviewPage;
pub use admin_wines::AdminWinesPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use wine_form::WineFormPage;
pub use wineries::WineriesPage;
pub use winery_detail::WineryDetailPage;
pub use wines::WinesPage;
