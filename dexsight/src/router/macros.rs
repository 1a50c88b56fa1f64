/// Route a call to the first connector advertising `$cap`, through the role
/// accessor, under the per-provider timeout.
///
/// Expands to an expression of type `Result<T, DexError>`; the caller decides
/// whether to `?` it.
macro_rules! provider_call {
    ($self:ident, $cap:expr, $accessor:ident, |$p:ident| $call:expr) => {{
        let cap: dexsight_core::Capability = $cap;
        match $self.route(cap) {
            Ok(connector) => match connector.$accessor() {
                Some($p) => {
                    $crate::core::Dexsight::provider_call_with_timeout(
                        connector.name(),
                        cap.as_str(),
                        $self.cfg.provider_timeout,
                        $call,
                    )
                    .await
                }
                None => Err(dexsight_core::DexError::connector(
                    connector.name(),
                    format!("missing {cap} capability during call"),
                )),
            },
            Err(e) => Err(e),
        }
    }};
}

pub(crate) use provider_call;
