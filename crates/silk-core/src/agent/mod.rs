//! Intent classification and system-prompt composition.
//!
//! Both run server-side once per relay request, upstream of the gateway
//! call: the latest user message is classified and the resulting intent
//! selects the stage block appended to the base system prompt.

pub mod intent;
pub mod prompt;
