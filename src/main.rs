//! kubeconfig CLI - view or manipulate your kubeconfig through kubectl

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use kubeconfig::commands::entries::{self, Entry};
use kubeconfig::commands::view::ViewArgs;
use kubeconfig::commands::{self, GlobalOptions, Session};
use kubeconfig::config::settings::Settings;
use kubeconfig::utils::errors::{display_error_and_exit, enhance_error};
use kubeconfig::{SetClusterOptions, SetContextOptions, SetCredentialsOptions};
use std::io;

#[derive(Parser)]
#[command(name = "kubeconfig")]
#[command(author, version, about = "View or manipulate your kubeconfig through kubectl", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry-run mode: show the kubectl commands without changing anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Work against this kubeconfig file instead of kubectl's default
    #[arg(long, global = true, env = "KUBECONFIG_FILE")]
    kubeconfig: Option<String>,

    /// kubectl program name or path
    #[arg(long, global = true)]
    kubectl: Option<String>,

    /// Do not ask before deleting entries
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged kubeconfig
    View {
        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        output: String,

        /// Only show what the current context uses
        #[arg(long)]
        minify: bool,

        /// Inline referenced certificate files
        #[arg(long)]
        flatten: bool,

        /// Keep secrets redacted
        #[arg(long)]
        redacted: bool,
    },

    /// Print the current context
    CurrentContext,

    /// List context names
    GetContexts,

    /// List cluster names
    GetClusters,

    /// List user names
    GetUsers,

    /// Set the current context
    UseContext { name: String },

    /// Rename a context
    RenameContext { old_name: String, new_name: String },

    /// Set an individual value by dot-delimited key
    Set { name: String, value: String },

    /// Unset an individual value by dot-delimited key
    Unset { name: String },

    /// Create or update a cluster entry
    SetCluster {
        name: String,

        /// Path to a certificate authority file
        #[arg(long)]
        certificate_authority: Option<String>,

        /// Embed the certificate authority in the kubeconfig
        #[arg(long)]
        embed_certs: Option<bool>,

        /// Skip API server certificate validation
        #[arg(long)]
        insecure_skip_tls_verify: Option<bool>,

        /// API server URI
        #[arg(long)]
        server: Option<String>,

        /// Server name used for certificate validation
        #[arg(long)]
        tls_server_name: Option<String>,

        /// Proxy URL for requests to this cluster
        #[arg(long)]
        proxy_url: Option<String>,
    },

    /// Create or update a context entry
    SetContext {
        name: String,

        #[arg(long)]
        cluster: Option<String>,

        #[arg(long)]
        namespace: Option<String>,

        #[arg(long)]
        user: Option<String>,
    },

    /// Create or update a user entry
    SetCredentials {
        name: String,

        /// Auth provider name (e.g. oidc, gcp)
        #[arg(long)]
        auth_provider: Option<String>,

        /// Auth provider setting as key=value (repeatable)
        #[arg(long = "auth-provider-arg")]
        auth_provider_args: Vec<String>,

        #[arg(long)]
        client_certificate: Option<String>,

        #[arg(long)]
        client_key: Option<String>,

        /// Embed the client certificate in the kubeconfig
        #[arg(long)]
        embed_certs: Option<bool>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        token: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// Credential plugin command
        #[arg(long)]
        exec_command: Option<String>,

        #[arg(long)]
        exec_api_version: Option<String>,

        /// Credential plugin argument (repeatable)
        #[arg(long = "exec-arg")]
        exec_args: Vec<String>,

        /// Credential plugin environment as key=value (repeatable)
        #[arg(long = "exec-env")]
        exec_env: Vec<String>,
    },

    /// Delete a cluster entry
    DeleteCluster { name: String },

    /// Delete a context entry
    DeleteContext { name: String },

    /// Delete a user entry
    DeleteUser { name: String },

    /// Check that kubectl is available
    Check,

    /// Manage the kubeconfig CLI settings file
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print an example settings file, or write it to a path
    Init {
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();

    kubeconfig::utils::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        display_error_and_exit(enhance_error(e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();
    let session = Session::new(
        &settings,
        GlobalOptions {
            kubeconfig: cli.kubeconfig,
            kubectl: cli.kubectl,
            dry_run: cli.dry_run,
            yes: cli.yes,
        },
    );

    if session.is_dry_run() {
        kubeconfig::log_info!("DRY RUN MODE: No changes will be made");
    }

    match cli.command {
        Commands::View {
            output,
            minify,
            flatten,
            redacted,
        } => commands::view::view(
            &session,
            ViewArgs {
                output,
                minify,
                flatten,
                redacted,
            },
        ),
        Commands::CurrentContext => commands::view::current_context(&session),
        Commands::GetContexts => commands::view::get_contexts(&session),
        Commands::GetClusters => commands::view::get_clusters(&session),
        Commands::GetUsers => commands::view::get_users(&session),
        Commands::UseContext { name } => entries::use_context(&session, &name),
        Commands::RenameContext { old_name, new_name } => {
            entries::rename_context(&session, &old_name, &new_name)
        }
        Commands::Set { name, value } => entries::set(&session, &name, &value),
        Commands::Unset { name } => entries::unset(&session, &name),
        Commands::SetCluster {
            name,
            certificate_authority,
            embed_certs,
            insecure_skip_tls_verify,
            server,
            tls_server_name,
            proxy_url,
        } => {
            let options = SetClusterOptions {
                certificate_authority,
                embed_certs,
                insecure_skip_tls_verify,
                server,
                tls_server_name,
                proxy_url,
            };
            entries::set_cluster(&session, &name, &options)
        }
        Commands::SetContext {
            name,
            cluster,
            namespace,
            user,
        } => {
            let options = SetContextOptions {
                cluster,
                namespace,
                user,
            };
            entries::set_context(&session, &name, &options)
        }
        Commands::SetCredentials {
            name,
            auth_provider,
            auth_provider_args,
            client_certificate,
            client_key,
            embed_certs,
            password,
            token,
            username,
            exec_command,
            exec_api_version,
            exec_args,
            exec_env,
        } => {
            let options = SetCredentialsOptions {
                auth_provider,
                auth_provider_args: entries::parse_key_values(&auth_provider_args)?,
                client_certificate,
                client_key,
                embed_certs,
                password,
                token,
                username,
                exec_command,
                exec_api_version,
                exec_args: (!exec_args.is_empty()).then_some(exec_args),
                exec_env: entries::parse_key_values(&exec_env)?,
            };
            entries::set_credentials(&session, &name, &options)
        }
        Commands::DeleteCluster { name } => entries::delete(&session, Entry::Cluster, &name),
        Commands::DeleteContext { name } => entries::delete(&session, Entry::Context, &name),
        Commands::DeleteUser { name } => entries::delete(&session, Entry::User, &name),
        Commands::Check => commands::check::check(&session),
        Commands::Settings { command } => match command {
            SettingsCommands::Init { path, force } => commands::settings::init(path, force),
            SettingsCommands::Show => commands::settings::show(&settings),
        },
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kubeconfig", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("kubeconfig {}", env!("CARGO_PKG_VERSION"));
    println!("A simple wrapper around kubectl config");
    Ok(())
}
