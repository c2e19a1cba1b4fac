pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Desktop notification, falling back to the terminal when delivery fails.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let mut notification = notify_rust::Notification::new();
        notification.summary(title).body(body).appname("Break Tracker");

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(notify_rust::Urgency::Critical);

        if let Err(e) = notification.show() {
            tracing::warn!(error = %e, "desktop notification failed");
            println!("\n⚠️  Notification failed: {e}");
            println!("📢 {title}: {body}");
        }
    }
}
