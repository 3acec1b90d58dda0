//! System notifications via freedesktop D-Bus.

use std::collections::HashMap;
use zbus::{blocking::Connection, proxy};

use crate::ui::{Message, MessageKind};

const NOTIFICATION_TIMEOUT_MS: i32 = 3000;

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Returns the id the server assigned to the notification.
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Icon name for a message severity.
pub fn icon_for(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "document-save",
        MessageKind::Warning => "dialog-warning",
        MessageKind::Error => "dialog-error",
    }
}

/// Sends a notification, blocking until the bus acknowledges it.
pub fn send_notification(summary: &str, body: &str, icon: &str) -> Result<(), String> {
    let connection = Connection::session()
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxyBlocking::new(&connection)
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    proxy
        .notify(
            "Drawover",
            0,
            icon,
            summary,
            body,
            vec![],
            HashMap::new(),
            NOTIFICATION_TIMEOUT_MS,
        )
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}

/// Mirrors an in-overlay message as a desktop notification, logging failures.
pub fn notify_message(message: &Message) {
    if let Err(e) = send_notification(&message.title, &message.body, icon_for(message.kind)) {
        log::warn!("Failed to send notification: {}", e);
    }
}
