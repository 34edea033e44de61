//! Motor de predição do Sentir.
//!
//! Este módulo implementa a orquestração cache-ou-computa: por texto,
//! decide entre servir do cache e chamar o classificador, grava
//! resultados novos com TTL, decompõe lotes preservando a ordem e
//! verifica a saúde das dependências.

mod engine;

pub use engine::PredictionEngine;
