//! Implementação dos comandos CLI do Sentir.

use std::path::PathBuf;

use crate::predict::PredictionEngine;
use crate::types::config::Config;
use crate::SentirResult;

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> SentirResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("sentir.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'sentir config' to modify.");
        return Ok(());
    }

    // Create default configuration
    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Sentir initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Check model and cache: sentir status");
    println!("  2. Configure options: sentir config");
    println!("  3. Start the API: sentir serve");

    Ok(())
}

/// Inicia o servidor HTTP.
pub async fn serve(port: Option<u16>, config: &Config) -> SentirResult<()> {
    use crate::http::ApiServer;

    let mut config = config.clone();
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::debug!(
        "Configuração carregada: host={}, porta={}, cache habilitado={}",
        config.server.host,
        config.server.port,
        config.cache.enabled
    );

    let server = ApiServer::new(config)?;
    server.run().await
}

/// Classifica um texto sem passar pelo servidor HTTP.
pub async fn predict(text: &str, no_cache: bool, config: &Config) -> SentirResult<()> {
    use crate::types::requests::validate_text;

    validate_text(text, &config.limits)?;

    let engine = PredictionEngine::from_config(config)?;
    let prediction = engine.predict_one(text, !no_cache).await?;

    println!("{}", serde_json::to_string_pretty(&prediction)?);

    Ok(())
}

/// Mostra status do modelo e do cache.
pub async fn status(config: &Config) -> SentirResult<()> {
    println!("Verificando status do serviço...\n");

    let engine = PredictionEngine::from_config(config)?;
    let report = engine.health().await;

    let model_icon = if report.model_loaded { "✓" } else { "✗" };
    let model_text = if report.model_loaded {
        "carregado"
    } else {
        "não carregado"
    };
    println!("  {} modelo {} - {}", model_icon, report.model, model_text);

    if !config.cache.enabled {
        println!("  ○ cache - desabilitado");
    } else {
        let cache_icon = if report.cache_reachable { "✓" } else { "✗" };
        let cache_text = if report.cache_reachable {
            "alcançável"
        } else {
            "não alcançável"
        };
        println!("  {} cache {} - {}", cache_icon, cache_endpoint(config), cache_text);
    }

    println!();
    println!("Status geral: {}", report.status);

    Ok(())
}

/// Descreve o endpoint do cache para mensagens de status.
fn cache_endpoint(config: &Config) -> String {
    match config.cache.backend.as_str() {
        "redis" => format!("redis em {}:{}", config.cache.host, config.cache.port),
        other => format!("{} ({} entradas)", other, config.cache.capacity),
    }
}

/// Configura opções interativamente.
pub async fn config_cmd(config_path: &PathBuf) -> SentirResult<()> {
    use super::interactive::{run_interactive_config, show_config_summary};

    // Mostra resumo antes de editar
    if config_path.exists() {
        let config = Config::load(config_path)?;
        show_config_summary(&config);
    }

    // Executa configuração interativa
    run_interactive_config(config_path)
}

/// Diagnostica problemas de configuração.
pub async fn doctor(config: &Config) -> SentirResult<()> {
    println!("Diagnosticando configuração do Sentir...\n");

    let mut issues: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    println!("✓ Configuração carregada");

    match PredictionEngine::from_config(config) {
        Ok(engine) => {
            println!("✓ Modelo '{}' carregado", engine.model_name());

            if !config.cache.enabled {
                println!("○ Cache desabilitado - toda predição será computada");
            } else {
                let report = engine.health().await;
                if report.cache_reachable {
                    println!("✓ Cache acessível: {}", cache_endpoint(config));
                } else {
                    warnings.push(format!(
                        "cache inacessível ({}) - o serviço degrada para computação direta",
                        cache_endpoint(config)
                    ));
                }
            }
        }
        Err(e) => {
            issues.push(format!("falha ao montar o motor de predição: {}", e));
        }
    }

    if config.limits.max_text_length == 0 {
        issues.push("max_text_length é 0 - toda requisição será rejeitada".to_string());
    }
    if config.limits.max_batch_size == 0 {
        issues.push("max_batch_size é 0 - todo lote será rejeitado".to_string());
    }
    if config.cache.enabled && config.cache.ttl_secs == 0 {
        warnings.push("ttl_secs é 0 - entradas de cache expiram imediatamente".to_string());
    }

    // Resumo
    println!();
    if issues.is_empty() && warnings.is_empty() {
        println!("✓ Tudo OK! Sentir está pronto para uso.");
    } else {
        if !warnings.is_empty() {
            println!("Avisos:");
            for warning in warnings {
                println!("  ⚠ {}", warning);
            }
        }
        if !issues.is_empty() {
            println!("Problemas:");
            for issue in issues {
                println!("  ✗ {}", issue);
            }
        }
    }

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("sentir {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("API de análise de sentimento com cache Redis");
    println!("https://github.com/SamoraDC/sentir");
}
