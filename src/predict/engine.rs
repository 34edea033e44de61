//! Orquestração cache-ou-computa das predições.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheKeyBuilder, CacheStore, MemoryStore, RedisStore};
use crate::classifier::{Classifier, LexiconClassifier};
use crate::types::config::{Config, LimitsConfig};
use crate::types::requests::validate_text;
use crate::types::responses::{
    BatchItem, BatchPrediction, CheckState, Classification, ErrorInfo, HealthChecks, HealthReport,
    HealthState, Prediction, PredictionError, ServiceEndpoints, ServiceInfo,
};
use crate::{SentirError, SentirResult};

/// Motor de predição de sentimento.
///
/// Mantém o classificador e o backend de cache compartilhados; cada
/// chamada é independente e segura para uso concorrente. Toda falha de
/// cache é absorvida aqui: o chamador só vê erro quando a própria
/// classificação falha.
pub struct PredictionEngine {
    config: Config,
    classifier: Arc<dyn Classifier>,
    store: Option<Arc<dyn CacheStore>>,
    keys: CacheKeyBuilder,
}

impl PredictionEngine {
    /// Monta o motor a partir da configuração: carrega o modelo padrão
    /// e constrói o backend de cache configurado.
    ///
    /// Falha se o modelo não carregar ou se a configuração de cache
    /// for inválida. Um Redis fora do ar não é erro de construção; as
    /// operações degradam individualmente.
    pub fn from_config(config: &Config) -> SentirResult<Self> {
        let classifier: Arc<dyn Classifier> =
            Arc::new(LexiconClassifier::load(&config.model.name)?);
        let store = build_store(config)?;

        Ok(Self::with_parts(config.clone(), classifier, store))
    }

    /// Monta o motor com colaboradores já construídos.
    pub fn with_parts(
        config: Config,
        classifier: Arc<dyn Classifier>,
        store: Option<Arc<dyn CacheStore>>,
    ) -> Self {
        let keys = CacheKeyBuilder::new(classifier.name());
        Self {
            config,
            classifier,
            store,
            keys,
        }
    }

    /// Identificador do modelo em uso.
    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Se o modelo está carregado.
    pub fn model_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    /// Limites de entrada configurados.
    pub fn limits(&self) -> &LimitsConfig {
        &self.config.limits
    }

    /// Prediz o sentimento de um texto.
    ///
    /// Com `use_cache`, consulta o cache antes de classificar e grava
    /// o resultado depois. Cache fora do ar degrada para o caminho de
    /// computação; a requisição nunca falha por causa do cache.
    pub async fn predict_one(&self, text: &str, use_cache: bool) -> SentirResult<Prediction> {
        let started = Instant::now();

        // A chave só existe quando o cache participa da requisição
        let key = if use_cache && self.store.is_some() {
            Some(self.keys.build(text))
        } else {
            None
        };

        if let Some(key) = key.as_deref() {
            if let Some(classification) = self.lookup(key).await {
                tracing::debug!(key = %key, text = %preview(text), "cache hit");
                return Ok(Prediction::from_cache(
                    text,
                    classification,
                    elapsed_ms(started),
                ));
            }
        }

        let classification = self.classify_bounded(text).await?;

        if let Some(key) = key.as_deref() {
            self.store_result(key, classification).await;
        }

        tracing::debug!(
            text = %preview(text),
            label = %classification.label,
            score = classification.score,
            "texto classificado"
        );

        Ok(Prediction::fresh(text, classification, elapsed_ms(started)))
    }

    /// Processa um lote preservando a ordem de entrada.
    ///
    /// `results[i]` corresponde sempre a `texts[i]`: sucesso ou
    /// marcador de erro. A falha de um item nunca interrompe os demais.
    pub async fn predict_batch(&self, texts: &[String], use_cache: bool) -> BatchPrediction {
        let started = Instant::now();
        let mut results = Vec::with_capacity(texts.len());
        let mut cached_count = 0;

        for text in texts {
            if let Err(e) = validate_text(text, &self.config.limits) {
                results.push(BatchItem::Failure(PredictionError {
                    text: text.clone(),
                    error: ErrorInfo::new(e.code(), e.wire_message()),
                }));
                continue;
            }

            match self.predict_one(text, use_cache).await {
                Ok(prediction) => {
                    if prediction.cached {
                        cached_count += 1;
                    }
                    results.push(BatchItem::Success(prediction));
                }
                Err(e) => {
                    tracing::warn!(text = %preview(text), error = %e, "item do lote falhou");
                    results.push(BatchItem::Failure(PredictionError {
                        text: text.clone(),
                        error: ErrorInfo::new(e.code(), e.wire_message()),
                    }));
                }
            }
        }

        let total = results.len();
        BatchPrediction {
            results,
            total,
            cached_count,
            latency_ms: elapsed_ms(started),
        }
    }

    /// Verifica a saúde do serviço e de suas dependências.
    ///
    /// O ping do cache é limitado pelo timeout do backend; a
    /// verificação nunca trava.
    pub async fn health(&self) -> HealthReport {
        let model_loaded = self.classifier.is_loaded();

        let (cache_reachable, cache_check) = match self.store.as_ref() {
            Some(store) => match store.ping().await {
                Ok(()) => (true, CheckState::Healthy),
                Err(e) => {
                    tracing::warn!(backend = store.backend(), error = %e, "ping do cache falhou");
                    (false, CheckState::Unhealthy)
                }
            },
            None => (false, CheckState::Unavailable),
        };

        let status = if !model_loaded {
            HealthState::Unhealthy
        } else if cache_reachable {
            HealthState::Healthy
        } else {
            HealthState::Degraded
        };

        HealthReport {
            status,
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: self.model_name().to_string(),
            timestamp: chrono::Utc::now(),
            model_loaded,
            cache_reachable,
            checks: HealthChecks {
                model: if model_loaded {
                    CheckState::Healthy
                } else {
                    CheckState::Unhealthy
                },
                cache: cache_check,
            },
        }
    }

    /// Documento raiz com os endpoints do serviço.
    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: self.model_name().to_string(),
            endpoints: ServiceEndpoints::default(),
        }
    }

    /// Busca uma classificação no cache, absorvendo qualquer falha.
    async fn lookup(&self, key: &str) -> Option<Classification> {
        let store = self.store.as_ref()?;

        match store.get(key).await {
            Ok(Some(raw)) => match CacheEntry::from_json(&raw) {
                Ok(entry) => Some(entry.classification()),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "entrada de cache corrompida, tratada como miss");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    backend = store.backend(),
                    error = %e,
                    "cache indisponível na leitura, seguindo sem cache"
                );
                None
            }
        }
    }

    /// Grava uma classificação no cache, absorvendo qualquer falha.
    async fn store_result(&self, key: &str, classification: Classification) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let entry = CacheEntry::new(key, classification);
        let payload = match entry.to_json() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "falha ao serializar entrada de cache");
                return;
            }
        };

        let ttl = Duration::from_secs(self.config.cache.ttl_secs);
        if let Err(e) = store.set(key, &payload, ttl).await {
            tracing::warn!(
                backend = store.backend(),
                error = %e,
                "falha ao gravar no cache, resultado servido sem cache"
            );
        }
    }

    /// Chama o classificador com o timeout configurado.
    async fn classify_bounded(&self, text: &str) -> SentirResult<Classification> {
        let timeout = Duration::from_secs(self.config.general.timeout_secs);

        match tokio::time::timeout(timeout, self.classifier.classify(text)).await {
            Ok(result) => result,
            Err(_) => Err(SentirError::ClassifierTimeout(
                self.classifier.name().to_string(),
            )),
        }
    }
}

/// Constrói o backend de cache configurado.
fn build_store(config: &Config) -> SentirResult<Option<Arc<dyn CacheStore>>> {
    if !config.cache.enabled {
        tracing::info!("cache desabilitado por configuração");
        return Ok(None);
    }

    match config.cache.backend.as_str() {
        "redis" => {
            let store = RedisStore::from_config(&config.cache)?;
            Ok(Some(Arc::new(store)))
        }
        "memory" => Ok(Some(Arc::new(MemoryStore::new(config.cache.capacity)))),
        other => Err(SentirError::config(format!(
            "backend de cache desconhecido: '{other}'"
        ))),
    }
}

/// Latência decorrida em milissegundos.
fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Prefixo de um texto para logs, sem quebrar UTF-8.
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 50;

    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::responses::Label;
    use async_trait::async_trait;

    /// Backend que falha em todas as operações.
    struct FailingStore;

    #[async_trait]
    impl CacheStore for FailingStore {
        fn backend(&self) -> &str {
            "failing"
        }

        async fn get(&self, _key: &str) -> SentirResult<Option<String>> {
            Err(SentirError::cache("backend fora do ar"))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> SentirResult<()> {
            Err(SentirError::cache("backend fora do ar"))
        }

        async fn ping(&self) -> SentirResult<()> {
            Err(SentirError::cache("backend fora do ar"))
        }
    }

    /// Classificador que sempre falha.
    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        fn is_loaded(&self) -> bool {
            true
        }

        async fn classify(&self, _text: &str) -> SentirResult<Classification> {
            Err(SentirError::ClassifierFailed(
                "failing".to_string(),
                "boom".to_string(),
            ))
        }
    }

    fn lexicon() -> Arc<dyn Classifier> {
        Arc::new(LexiconClassifier::load("lexicon-test").unwrap())
    }

    fn engine_with_store(store: Option<Arc<dyn CacheStore>>) -> PredictionEngine {
        PredictionEngine::with_parts(Config::default(), lexicon(), store)
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let engine = engine_with_store(Some(Arc::new(MemoryStore::new(10))));

        let first = engine.predict_one("I love this product!", true).await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.label, Label::Positive);
        assert!(first.score > 0.9);

        let second = engine.predict_one("I love this product!", true).await.unwrap();
        assert!(second.cached);
        assert_eq!(second.label, first.label);
        assert_eq!(second.score, first.score);
    }

    #[tokio::test]
    async fn test_use_cache_false_skips_cache() {
        let store = Arc::new(MemoryStore::new(10));
        let engine = engine_with_store(Some(store.clone()));

        let first = engine.predict_one("I love this", false).await.unwrap();
        let second = engine.predict_one("I love this", false).await.unwrap();

        assert!(!first.cached);
        assert!(!second.cached);
        assert_eq!(store.stats().size, 0);
    }

    #[tokio::test]
    async fn test_cache_outage_degrades_to_compute() {
        let engine = engine_with_store(Some(Arc::new(FailingStore)));

        // Leitura e gravação falham, mas a predição sai normal
        let result = engine.predict_one("I love this product!", true).await.unwrap();

        assert!(!result.cached);
        assert_eq!(result.label, Label::Positive);
    }

    #[tokio::test]
    async fn test_no_store_still_predicts() {
        let engine = engine_with_store(None);

        let result = engine.predict_one("I hate this", true).await.unwrap();

        assert!(!result.cached);
        assert_eq!(result.label, Label::Negative);
    }

    #[tokio::test]
    async fn test_corrupt_entry_treated_as_miss() {
        let store = Arc::new(MemoryStore::new(10));
        let engine = engine_with_store(Some(store.clone()));

        // Grava lixo sob a chave que o motor vai consultar
        let key = CacheKeyBuilder::new("lexicon-test").build("I love this");
        store
            .set(&key, "isto não é json", Duration::from_secs(60))
            .await
            .unwrap();

        let result = engine.predict_one("I love this", true).await.unwrap();
        assert!(!result.cached);
        assert_eq!(result.label, Label::Positive);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let engine = engine_with_store(None);
        let texts = vec!["I love this".to_string(), "I hate this".to_string()];

        let batch = engine.predict_batch(&texts, false).await;

        assert_eq!(batch.total, 2);
        assert_eq!(batch.cached_count, 0);
        for (item, text) in batch.results.iter().zip(&texts) {
            assert_eq!(item.text(), text);
        }

        match (&batch.results[0], &batch.results[1]) {
            (BatchItem::Success(a), BatchItem::Success(b)) => {
                assert_eq!(a.label, Label::Positive);
                assert_eq!(b.label, Label::Negative);
                assert!(!a.cached);
                assert!(!b.cached);
            }
            _ => panic!("esperava dois sucessos"),
        }
    }

    #[tokio::test]
    async fn test_batch_invalid_item_gets_marker() {
        let engine = engine_with_store(None);
        let texts = vec!["   ".to_string(), "I love this".to_string()];

        let batch = engine.predict_batch(&texts, false).await;

        assert_eq!(batch.total, 2);
        match &batch.results[0] {
            BatchItem::Failure(failure) => {
                assert_eq!(failure.error.error, "validation");
                assert_eq!(failure.text, "   ");
            }
            _ => panic!("esperava marcador de erro no primeiro slot"),
        }
        assert!(batch.results[1].is_success());
    }

    #[tokio::test]
    async fn test_batch_classifier_failure_gets_marker() {
        let engine = PredictionEngine::with_parts(
            Config::default(),
            Arc::new(FailingClassifier),
            None,
        );
        let texts = vec!["qualquer texto".to_string()];

        let batch = engine.predict_batch(&texts, false).await;

        match &batch.results[0] {
            BatchItem::Failure(failure) => {
                assert_eq!(failure.error.error, "classifier");
                // Mensagem genérica, sem detalhe interno
                assert_eq!(failure.error.message, "prediction failed");
            }
            _ => panic!("esperava marcador de erro"),
        }
    }

    #[tokio::test]
    async fn test_batch_cached_count() {
        let engine = engine_with_store(Some(Arc::new(MemoryStore::new(10))));
        let texts = vec!["same text".to_string(), "same text".to_string()];

        let batch = engine.predict_batch(&texts, true).await;

        assert_eq!(batch.total, 2);
        assert_eq!(batch.cached_count, 1);
    }

    #[tokio::test]
    async fn test_health_healthy() {
        let engine = engine_with_store(Some(Arc::new(MemoryStore::new(10))));

        let report = engine.health().await;

        assert_eq!(report.status, HealthState::Healthy);
        assert!(report.model_loaded);
        assert!(report.cache_reachable);
        assert_eq!(report.checks.cache, CheckState::Healthy);
    }

    #[tokio::test]
    async fn test_health_degraded_on_cache_outage() {
        let engine = engine_with_store(Some(Arc::new(FailingStore)));

        let report = engine.health().await;

        assert_eq!(report.status, HealthState::Degraded);
        assert!(report.model_loaded);
        assert!(!report.cache_reachable);
        assert_eq!(report.checks.cache, CheckState::Unhealthy);
    }

    #[tokio::test]
    async fn test_health_degraded_without_store() {
        let engine = engine_with_store(None);

        let report = engine.health().await;

        assert_eq!(report.status, HealthState::Degraded);
        assert_eq!(report.checks.cache, CheckState::Unavailable);
    }

    #[tokio::test]
    async fn test_from_config_rejects_unknown_backend() {
        let mut config = Config::default();
        config.cache.backend = "cassandra".to_string();

        assert!(PredictionEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "á".repeat(80);
        let shown = preview(&long);

        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 53);
    }

    #[test]
    fn test_service_info_endpoints() {
        let engine = engine_with_store(None);
        let info = engine.service_info();

        assert_eq!(info.endpoints.predict, "/predict");
        assert_eq!(info.endpoints.batch_predict, "/batch-predict");
        assert_eq!(info.model, "lexicon-test");
    }
}
