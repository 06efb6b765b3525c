mod notification;

pub use notification::{Notification, NotificationData, NotificationKind};
