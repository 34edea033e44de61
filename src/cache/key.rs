//! Construção de chaves de cache.

use sha2::{Digest, Sha256};

/// Namespace fixo de todas as chaves do serviço.
const NAMESPACE: &str = "sentiment";

/// Construtor de chaves determinísticas.
///
/// A chave é `sentiment:<modelo>:<sha256 do texto normalizado>`. O
/// identificador do modelo participa da chave para que uma troca de
/// modelo nunca sirva rótulos gravados pela versão anterior.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    model: String,
}

impl CacheKeyBuilder {
    /// Cria um construtor para o modelo dado.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Gera a chave de cache para um texto.
    pub fn build(&self, text: &str) -> String {
        let normalized = normalize_text(text);

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        let digest = hex::encode(hasher.finalize());

        format!("{}:{}:{}", NAMESPACE, self.model, digest)
    }
}

/// Normaliza um texto para fins de chave: remove espaços nas bordas e
/// colapsa sequências internas de whitespace. Caixa é preservada.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_determinism() {
        let builder = CacheKeyBuilder::new("modelo-v1");

        let key1 = builder.build("I love this product!");
        let key2 = builder.build("I love this product!");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_normalization() {
        let builder = CacheKeyBuilder::new("modelo-v1");

        // Whitespace extra é ignorado
        let key1 = builder.build("hello   world");
        let key2 = builder.build("  hello world  ");
        let key3 = builder.build("hello\tworld\n");

        assert_eq!(key1, key2);
        assert_eq!(key1, key3);
    }

    #[test]
    fn test_key_preserves_case() {
        let builder = CacheKeyBuilder::new("modelo-v1");

        assert_ne!(builder.build("Hello"), builder.build("hello"));
    }

    #[test]
    fn test_distinct_texts_distinct_keys() {
        let builder = CacheKeyBuilder::new("modelo-v1");

        assert_ne!(builder.build("good"), builder.build("bad"));
    }

    #[test]
    fn test_model_segregates_keys() {
        let v1 = CacheKeyBuilder::new("modelo-v1");
        let v2 = CacheKeyBuilder::new("modelo-v2");

        // Troca de modelo nunca reaproveita chaves antigas
        assert_ne!(v1.build("same text"), v2.build("same text"));
    }

    #[test]
    fn test_key_format() {
        let builder = CacheKeyBuilder::new("modelo-v1");
        let key = builder.build("any text");

        let parts: Vec<&str> = key.splitn(3, ':').collect();
        assert_eq!(parts[0], "sentiment");
        assert_eq!(parts[1], "modelo-v1");
        assert_eq!(parts[2].len(), 64); // sha256 em hex
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a  b  "), "a b");
        assert_eq!(normalize_text("a\n\nb"), "a b");
        assert_eq!(normalize_text(""), "");
    }
}
