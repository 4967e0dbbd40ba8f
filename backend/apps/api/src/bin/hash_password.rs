//! Password Hash Helper
//!
//! Reads a password from stdin and prints the Argon2id PHC string to store
//! in the `users.password` column.
//!
//! ```sh
//! printf '%s' 'correct horse' | cargo run --bin hash-password
//! ```

use std::io::{self, Read};

use anyhow::{Context, bail};
use platform::password::ClearTextPassword;

fn main() -> anyhow::Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read password from stdin")?;

    // Only the line terminator is stripped; other whitespace is significant
    let raw = input
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(&input)
        .to_string();

    let password = ClearTextPassword::new(raw);
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hashed = password.hash()?;
    println!("{}", hashed.as_str());

    Ok(())
}
