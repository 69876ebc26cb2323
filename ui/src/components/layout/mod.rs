pub mod admin_layout;
pub mod footer;
pub mod header;
pub mod main_layout;

pub use admin_layout::AdminLayout;
pub use footer::Footer;
pub use header::Header;
pub use main_layout::MainLayout;
