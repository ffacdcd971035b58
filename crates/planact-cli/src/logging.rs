use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "PLANACT_LOG";

/// Filtro de log: `PLANACT_LOG`, depois `RUST_LOG`, por fim o nível da
/// configuração.
fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Inicializa o tracing em stderr; stdout fica livre para a saída do comando.
pub fn init(fallback_level: &str) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Pode já ter sido inicializado (testes); nesse caso mantém o existente.
    let _ = tracing_subscriber::registry()
        .with(build_filter(fallback_level))
        .with(stderr_layer)
        .try_init();
}
