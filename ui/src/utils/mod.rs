use payloads::{ClientError, ErrorKind};

pub mod time;

/// User-facing text for a failed request.
pub fn describe_error(error: &ClientError) -> String {
    match error.kind() {
        ErrorKind::Unauthorized => {
            "Your admin credentials were not accepted. Please sign in again."
                .to_string()
        }
        ErrorKind::NotFound => format!("Not found: {error}"),
        ErrorKind::Network | ErrorKind::Rejected => error.to_string(),
    }
}

/// Blocking notice for a failed mutation.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window()
        && let Err(e) = window.alert_with_message(message)
    {
        tracing::error!("alert failed: {e:?}");
    }
}

/// Blocking yes/no question. Anything but an explicit "OK" is a no.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Log a failed mutation and tell the admin with an alert.
pub fn report_failure(action: &str, error: &ClientError) {
    tracing::error!("{action} failed: {error}");
    alert(&format!("{action} failed: {}", describe_error(error)));
}
