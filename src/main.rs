use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;

use bank_accounts::cli::{handle_account_command, AccountCommands, LineInput, Menu};
use bank_accounts::config::{AccountsPaths, Settings};
use bank_accounts::display::ConsoleNotifier;
use bank_accounts::services::AccountService;
use bank_accounts::storage::Storage;

#[derive(Parser)]
#[command(
    name = "accounts",
    version,
    about = "Terminal account book: create accounts, deposit, withdraw, check balances",
    long_about = "Keeps one small JSON record per account. Run without a subcommand \
                  for the interactive menu, or use the subcommands from scripts."
)]
struct Cli {
    /// Directory holding account records (default: $ACCOUNTS_DATA_DIR or ./accounts)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (the default)
    Menu,

    #[command(flatten)]
    Account(AccountCommands),

    /// Show current configuration and paths
    Config {
        /// Write the settings file with current values
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => AccountsPaths::with_data_dir(dir),
        None => AccountsPaths::new(),
    };
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(&paths)?;
    if !settings.audit_enabled {
        storage = storage.without_audit();
    }

    let color = settings.color
        && !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_tty();
    let mut notifier = ConsoleNotifier::stdout(color);

    match cli.command {
        None | Some(Commands::Menu) => {
            let service = AccountService::new(&storage);
            Menu::new(service, LineInput::stdin(), notifier)
                .with_currency_symbol(settings.currency_symbol.clone())
                .run()?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, &mut notifier, cmd)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
            }
            println!("Accounts Configuration");
            println!("======================");
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Color:           {}", settings.color);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
    }

    Ok(())
}
