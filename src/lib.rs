//! Alexa webhook service that forwards spoken questions to Gemini.
//!
//! The skill receives intent envelopes over HTTP, runs them through a
//! request interceptor chain (locale resolution), dispatches them to the
//! first matching handler, and always answers with a well-formed speech
//! response. The only outbound call is the question-answering request to
//! the Gemini service; every failure along the way degrades to a spoken
//! fallback instead of an HTTP error.

pub mod config;
pub mod envelope;
pub mod gemini;
pub mod handlers;
pub mod i18n;
pub mod interceptor;
pub mod response;
pub mod server;
pub mod skill;
