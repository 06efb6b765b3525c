pub mod notification_handler;
