//! CLI администратора Sezam
//!
//! Клиент командной строки для локального хранилища учётных записей.
//! Поддерживает создание/изменение/удаление пользователей, просмотр
//! списка учётных записей и проверку входа.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sezam::{
    config::Settings, logging::init_logging, AccountManager, Authenticator, CredentialStore,
    SaveMode, SessionState,
};

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "sezam-cli")]
#[command(author = "Sezam Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sezam CLI - manage the local credential store", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Путь к файлу учётных записей
    #[arg(
        short = 'f',
        long,
        env = "SEZAM_USERS_FILE",
        help = "Путь к файлу учётных записей (по умолчанию users.json)"
    )]
    users_file: Option<String>,
    /// Отклонять запись по устаревшему снимку файла
    #[arg(long, help = "Отклонять запись, если файл изменился после чтения")]
    checked_save: bool,
    /// Имя действующего лица (нужно при закрытом админ-режиме)
    #[arg(
        long,
        env = "SEZAM_AUTH_USER",
        help = "Имя пользователя для аутентификации действующего лица"
    )]
    auth_user: Option<String>,
    /// Пароль действующего лица
    #[arg(
        long,
        env = "SEZAM_AUTH_PASSWORD",
        help = "Пароль действующего лица (можно через переменную окружения SEZAM_AUTH_PASSWORD)"
    )]
    auth_password: Option<String>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Включить подробный вывод для отладки")]
    verbose: bool,
    /// Подавить большинство логов (только warn/error)
    #[arg(short = 'q', long, help = "Подавить логирование (только warn/error)")]
    quiet: bool,
    /// Подкоманда для выполнения
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Управление учётными записями
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Проверка входа с указанными учётными данными
    Login { username: String, password: String },
}

#[derive(Subcommand)]
enum UserAction {
    /// Создать учётную запись
    Create { username: String, password: String },
    /// Сменить пароль (требуется текущий пароль)
    Passwd {
        username: String,
        old_password: String,
        new_password: String,
    },
    /// Перезаписать пароль без знания старого
    Reset {
        username: String,
        new_password: String,
    },
    /// Удалить учётную запись
    Delete { username: String },
    /// Список имён учётных записей
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    init_logging(level);

    let settings = Settings::load().context("failed to load settings")?;
    let users_file = cli
        .users_file
        .clone()
        .unwrap_or_else(|| settings.users_file.clone());
    let save_mode = if cli.checked_save || settings.checked_save {
        SaveMode::Checked
    } else {
        SaveMode::Overwrite
    };

    let store = CredentialStore::with_save_mode(&users_file, save_mode);
    let authenticator = Authenticator::new(store.clone());
    let manager = AccountManager::with_policy(store, settings.admin_policy());

    // Сессия действующего лица: анонимная, либо аутентифицированная
    // через --auth-user/--auth-password (закрытый админ-режим).
    let mut actor = SessionState::default();
    if let (Some(user), Some(password)) = (&cli.auth_user, &cli.auth_password) {
        authenticator
            .login(&mut actor, user, password)
            .context("actor authentication failed")?;
    }

    match cli.command {
        Commands::Login { username, password } => {
            let mut session = SessionState::default();
            authenticator.login(&mut session, &username, &password)?;
            println!("{session}");
        }
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                manager.create(&actor, &username, &password)?;
                println!("Account '{username}' created");
            }
            UserAction::Passwd {
                username,
                old_password,
                new_password,
            } => {
                manager.change_password(&actor, &username, &old_password, &new_password)?;
                println!("Password updated for '{username}'");
            }
            UserAction::Reset {
                username,
                new_password,
            } => {
                manager.reset_password(&actor, &username, &new_password)?;
                println!("Password reset for '{username}'");
            }
            UserAction::Delete { username } => {
                manager.delete(&actor, &username)?;
                println!("Account '{username}' deleted");
            }
            UserAction::List => {
                for name in manager.usernames(&actor)? {
                    println!("{name}");
                }
            }
        },
    }

    Ok(())
}
