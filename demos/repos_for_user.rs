//! List the repositories a user can reach.
//!
//! ```text
//! cargo run --example repos_for_user -- path/to/gitolite.conf alice
//! ```
//!
//! Set `RUST_LOG=gitolite_core=debug` to watch the parser and resolver.

use std::env;
use std::process::ExitCode;

use gitolite_core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [path, user] = args.as_slice() else {
        eprintln!("usage: repos_for_user <config> <user>");
        return ExitCode::from(2);
    };

    let config = match Config::load_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error {}: {e}", e.code());
            return ExitCode::FAILURE;
        }
    };

    for repo in config.repositories_for_user(user) {
        let grant = config
            .find_grant(user, repo.name())
            .map(|g| g.permission.to_string())
            .unwrap_or_default();
        println!("{:<30} {grant}", repo.name());
    }
    ExitCode::SUCCESS
}
