//! Interface de linha de comando do Sentir.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sentir - API de análise de sentimento com cache Redis.
#[derive(Parser, Debug)]
#[command(name = "sentir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "sentir.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Inicia o servidor HTTP.
    Serve {
        /// Porta do servidor (sobrescreve a configuração).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classifica um texto diretamente no terminal.
    Predict {
        /// Texto a classificar.
        text: String,

        /// Ignora o cache nesta predição.
        #[arg(long)]
        no_cache: bool,
    },

    /// Mostra status do modelo e do cache.
    Status,

    /// Configura opções interativamente.
    Config,

    /// Diagnostica problemas de configuração.
    Doctor,

    /// Mostra versão.
    Version,
}
