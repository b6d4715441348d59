pub mod data_stores;
pub mod http_notification_client;
pub mod mock_notification_client;
