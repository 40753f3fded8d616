use crate::envelope::RequestEnvelope;
use crate::i18n::{LocaleRegistry, MessageKey, SkillStrings};
use anyhow::Result;

/// Ephemeral per-request state produced by the interceptor chain and
/// threaded explicitly into the dispatcher and handlers. Dropped when the
/// request completes; nothing survives across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    strings: &'static SkillStrings,
}

impl RequestContext {
    /// Fresh context preloaded with the default locale's table; interceptor
    /// stages refine it.
    pub fn new() -> Self {
        Self {
            strings: LocaleRegistry::get().default_locale().strings,
        }
    }

    /// Replace the resolved translation table.
    pub fn set_strings(&mut self, strings: &'static SkillStrings) {
        self.strings = strings;
    }

    /// Localized text for a message key, or the key itself unchanged when
    /// the key is unknown.
    pub fn t(&self, key: &str) -> String {
        match MessageKey::from_key(key) {
            Some(key) => self.strings.get(key).to_string(),
            None => key.to_string(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A stage of the request interceptor chain. Stages run in registration
/// order before dispatch; each may read the envelope and write into the
/// context. A failing stage aborts the chain and surfaces as a
/// dispatch-level error.
pub trait RequestInterceptor: Send + Sync {
    fn process(&self, envelope: &RequestEnvelope, context: &mut RequestContext) -> Result<()>;
}

/// Resolves the envelope's locale and installs the matching translation
/// table into the context.
pub struct LocalizationInterceptor;

impl RequestInterceptor for LocalizationInterceptor {
    fn process(&self, envelope: &RequestEnvelope, context: &mut RequestContext) -> Result<()> {
        context.set_strings(LocaleRegistry::get().resolve(envelope.locale()));
        Ok(())
    }
}

/// Ordered list of request interceptors, run to completion before any
/// handler executes.
pub struct InterceptorChain {
    stages: Vec<Box<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Chain with the skill's standard stages registered.
    pub fn new() -> Self {
        let mut chain = Self { stages: Vec::new() };
        chain.register(Box::new(LocalizationInterceptor));
        chain
    }

    /// Append a stage; stages execute in registration order.
    pub fn register(&mut self, stage: Box<dyn RequestInterceptor>) {
        self.stages.push(stage);
    }

    /// Run every stage over a fresh context and return the context.
    pub fn run(&self, envelope: &RequestEnvelope) -> Result<RequestContext> {
        let mut context = RequestContext::new();
        for stage in &self.stages {
            stage.process(envelope, &mut context)?;
        }
        Ok(context)
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::new()
    }
}
