//! Classificador de sentimento baseado em léxico.
//!
//! Modelo determinístico embutido no binário: soma pesos de polaridade
//! por palavra (escala -5..5), com tratamento de negação e de
//! intensificadores, e mapeia a magnitude do resultado para uma
//! confiança em [0.5, 1).

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use super::Classifier;
use crate::types::responses::{Classification, Label};
use crate::{SentirError, SentirResult};

/// Janela de tokens em que uma negação permanece ativa.
const NEGATION_WINDOW: usize = 3;

/// Fator aplicado ao peso de uma palavra negada, além da inversão.
const NEGATION_DAMP: f64 = 0.75;

/// Inclinação da curva que converte magnitude em confiança.
const CONFIDENCE_SLOPE: f64 = 0.6;

/// Pesos de polaridade por palavra, escala -5..5.
const LEXICON: &[(&str, f64)] = &[
    // Positivas
    ("love", 3.0), ("loved", 3.0), ("loves", 3.0), ("lovely", 3.0), ("adore", 3.0),
    ("like", 2.0), ("liked", 2.0), ("likes", 2.0), ("enjoy", 2.0), ("enjoyed", 2.0),
    ("amazing", 4.0), ("awesome", 4.0), ("excellent", 3.0), ("fantastic", 4.0),
    ("great", 3.0), ("good", 3.0), ("nice", 3.0), ("wonderful", 4.0), ("best", 3.0),
    ("better", 2.0), ("beautiful", 3.0), ("brilliant", 4.0), ("perfect", 3.0),
    ("happy", 3.0), ("glad", 3.0), ("pleased", 3.0), ("pleasant", 3.0),
    ("satisfied", 2.0), ("satisfying", 2.0), ("recommend", 2.0), ("recommended", 2.0),
    ("impressive", 3.0), ("impressed", 3.0), ("outstanding", 5.0), ("superb", 5.0),
    ("delightful", 3.0), ("fun", 4.0), ("funny", 4.0), ("helpful", 2.0),
    ("useful", 2.0), ("easy", 1.0), ("fast", 1.0), ("quick", 1.0), ("reliable", 2.0),
    ("solid", 2.0), ("smooth", 2.0), ("works", 1.0), ("worked", 1.0), ("working", 1.0),
    ("fresh", 1.0), ("clean", 2.0), ("comfortable", 2.0), ("friendly", 2.0),
    ("generous", 2.0), ("honest", 2.0), ("incredible", 4.0), ("magnificent", 4.0),
    ("marvelous", 4.0), ("phenomenal", 4.0), ("remarkable", 2.0), ("stunning", 4.0),
    ("thank", 2.0), ("thanks", 2.0), ("worth", 2.0), ("joy", 3.0), ("win", 4.0),
    ("success", 2.0), ("successful", 3.0), ("super", 3.0), ("favorite", 2.0),
    ("gem", 3.0), ("flawless", 4.0), ("quality", 1.0), ("sturdy", 2.0),
    // Negativas
    ("hate", -3.0), ("hated", -3.0), ("hates", -3.0), ("awful", -3.0),
    ("terrible", -3.0), ("horrible", -3.0), ("bad", -3.0), ("worse", -3.0),
    ("worst", -3.0), ("poor", -2.0), ("disappointing", -2.0), ("disappointed", -2.0),
    ("disappointment", -2.0), ("useless", -2.0), ("broken", -1.0), ("broke", -1.0),
    ("breaks", -1.0), ("bug", -2.0), ("buggy", -2.0), ("bugs", -2.0),
    ("crash", -2.0), ("crashes", -2.0), ("crashed", -2.0), ("slow", -2.0),
    ("annoying", -2.0), ("annoyed", -2.0), ("frustrating", -2.0), ("frustrated", -2.0),
    ("angry", -3.0), ("upset", -2.0), ("sad", -2.0), ("unhappy", -2.0),
    ("refund", -2.0), ("waste", -2.0), ("wasted", -2.0), ("garbage", -3.0),
    ("trash", -2.0), ("junk", -2.0), ("defective", -3.0), ("fail", -2.0),
    ("failed", -2.0), ("fails", -2.0), ("failure", -2.0), ("problem", -2.0),
    ("problems", -2.0), ("issue", -1.0), ("issues", -1.0), ("error", -2.0),
    ("errors", -2.0), ("wrong", -2.0), ("ugly", -3.0), ("flimsy", -2.0),
    ("scam", -2.0), ("fraud", -4.0), ("lie", -2.0), ("lies", -2.0), ("lying", -2.0),
    ("misleading", -2.0), ("regret", -2.0), ("avoid", -1.0), ("boring", -3.0),
    ("bland", -1.0), ("mediocre", -2.0), ("disgusting", -3.0), ("nasty", -3.0),
    ("pathetic", -3.0), ("ridiculous", -3.0), ("stupid", -2.0), ("dumb", -3.0),
    ("painful", -2.0), ("pain", -2.0), ("nightmare", -3.0), ("mess", -2.0),
    ("messy", -2.0), ("confusing", -2.0), ("confused", -2.0), ("unreliable", -2.0),
    ("unusable", -3.0), ("unacceptable", -2.0), ("overpriced", -2.0),
    ("expensive", -1.0), ("died", -3.0), ("dead", -3.0), ("dies", -3.0),
    ("stuck", -2.0), ("freeze", -2.0), ("freezes", -2.0), ("froze", -2.0),
    ("lag", -2.0), ("laggy", -2.0), ("glitch", -2.0), ("glitchy", -2.0),
    ("complaint", -2.0), ("complain", -2.0), ("cheap", -1.0),
];

/// Palavras que invertem a polaridade das próximas palavras.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "without", "hardly", "barely",
    "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "wont", "cant", "couldnt",
    "shouldnt", "wouldnt",
];

/// Multiplicadores aplicados à próxima palavra com polaridade.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5), ("really", 1.5), ("extremely", 2.0), ("absolutely", 2.0),
    ("incredibly", 2.0), ("totally", 1.5), ("so", 1.3), ("too", 1.3),
    ("quite", 1.2), ("highly", 1.5), ("truly", 1.5), ("slightly", 0.5),
    ("somewhat", 0.5),
];

/// Classificador determinístico baseado em léxico embutido.
pub struct LexiconClassifier {
    name: String,
    weights: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconClassifier {
    /// Carrega o léxico embutido sob o identificador de modelo dado.
    pub fn load(name: impl Into<String>) -> SentirResult<Self> {
        let classifier = Self {
            name: name.into(),
            weights: LEXICON.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        };

        if classifier.weights.is_empty() {
            return Err(SentirError::ModelNotLoaded(classifier.name));
        }

        Ok(classifier)
    }

    /// Pontua um texto somando os pesos de suas palavras.
    fn score_text(&self, text: &str) -> Classification {
        let tokens = tokenize(text);

        let mut net = 0.0;
        let mut negated = false;
        let mut window = 0usize;
        let mut intensity = 1.0;

        for token in &tokens {
            let token = token.as_str();

            if self.negators.contains(token) {
                negated = true;
                window = NEGATION_WINDOW;
                continue;
            }

            if let Some(mult) = self.intensifiers.get(token) {
                intensity *= mult;
                continue;
            }

            if let Some(weight) = self.weights.get(token) {
                let mut value = weight * intensity;
                if negated {
                    value = -value * NEGATION_DAMP;
                }
                net += value;
                negated = false;
                window = 0;
                intensity = 1.0;
            } else {
                // Palavra neutra: consome a janela de negação e
                // desarma o intensificador pendente.
                intensity = 1.0;
                if negated {
                    window -= 1;
                    if window == 0 {
                        negated = false;
                    }
                }
            }
        }

        let label = if net < 0.0 {
            Label::Negative
        } else {
            Label::Positive
        };
        let confidence = 1.0 - 0.5 * (-net.abs() * CONFIDENCE_SLOPE).exp();

        Classification::new(label, confidence)
    }
}

#[async_trait]
impl Classifier for LexiconClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_loaded(&self) -> bool {
        !self.weights.is_empty()
    }

    async fn classify(&self, text: &str) -> SentirResult<Classification> {
        if !self.is_loaded() {
            return Err(SentirError::ModelNotLoaded(self.name.clone()));
        }
        Ok(self.score_text(text))
    }
}

/// Normaliza e separa um texto em tokens minúsculos.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.replace('\'', ""))
        .filter(|t| !t.is_empty())
        .collect()
}
