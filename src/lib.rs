pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod intake;
pub mod mail_transport;
pub mod notification;
pub mod routes;
pub mod smtp_email_sender;
pub mod startup;
pub mod telemetry;
mod utils;
