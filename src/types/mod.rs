//! Tipos centrais do Sentir.
//!
//! Este módulo concentra a configuração, os erros e os tipos de
//! requisição e resposta compartilhados entre a API HTTP e a CLI.

pub mod config;
pub mod errors;
pub mod requests;
pub mod responses;
