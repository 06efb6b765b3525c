pub mod feed_handler;
