//! Classificadores de sentimento do Sentir.
//!
//! Este módulo define a interface unificada para backends de
//! classificação e fornece a implementação padrão baseada em léxico,
//! determinística e embutida no binário.

mod lexicon;

pub use lexicon::LexiconClassifier;

use async_trait::async_trait;

use crate::types::responses::Classification;
use crate::SentirResult;

/// Trait para backends de classificação de sentimento.
///
/// Cada backend encapsula um modelo e fornece uma interface única
/// para o motor de predição. Implementações devem ser determinísticas
/// para uma mesma versão de modelo, já que os resultados são cacheados
/// sob uma chave que inclui o identificador do modelo.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Identificador do modelo, usado em logs e nas chaves de cache.
    fn name(&self) -> &str;

    /// Se o modelo está carregado e pronto para classificar.
    fn is_loaded(&self) -> bool;

    /// Classifica um texto, retornando polaridade e confiança em [0, 1].
    async fn classify(&self, text: &str) -> SentirResult<Classification>;
}
