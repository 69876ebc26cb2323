pub mod session;
pub mod toast;

pub use session::{SessionHandle, SessionProvider, use_session};
pub use toast::{ToastHandle, ToastProvider, use_toast};
