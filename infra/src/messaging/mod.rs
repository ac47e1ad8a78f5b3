//! Messaging module - AMQP implementations using lapin
//!
//! Outbound: the fanout notification channel used to broadcast rotated
//! public keys. Inbound: the compromise listener that suspends accounts
//! flagged by sibling services.

mod rabbit_channel;
mod suspension_listener;

pub use rabbit_channel::RabbitNotificationChannel;
pub use suspension_listener::SuspensionListener;
