use std::{env, fs::File, path::Path};

use crate::config::data::SolanaConfig;

pub fn parse_solana_config() -> Option<SolanaConfig> {
    let home = if cfg!(unix) {
        env::var_os("HOME").expect("Couldn't find UNIX home key.")
    } else if cfg!(windows) {
        let drive = env::var_os("HOMEDRIVE").expect("Couldn't find Windows home drive key.");
        let path = env::var_os("HOMEPATH").expect("Couldn't find Windows home path key.");
        Path::new(&drive).join(&path).as_os_str().to_owned()
    } else {
        panic!("Unsupported OS!");
    };

    let config_path = Path::new(&home)
        .join(".config")
        .join("solana")
        .join("cli")
        .join("config.yml");

    let conf_file = match File::open(config_path) {
        Ok(f) => f,
        Err(_) => return None,
    };
    serde_yaml::from_reader(&conf_file).ok()
}

/// Map the most common raw RPC failure messages to something actionable
/// before showing them to the user.
pub fn parse_rpc_errors(error_message: &str) -> String {
    if error_message.contains("insufficient funds") {
        return "Insufficient funds in the payer wallet to complete the transaction.".to_string();
    }

    if error_message.contains("Blockhash not found") {
        return "Transaction expired before confirmation. Try again.".to_string();
    }

    if error_message.contains("connection refused") || error_message.contains("dns error") {
        return "Could not reach the RPC endpoint. Check the rpcUrl value and your connection."
            .to_string();
    }

    error_message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rpc_errors_known_and_unknown() {
        assert!(parse_rpc_errors("Error: insufficient funds for rent").contains("payer wallet"));
        assert!(parse_rpc_errors("RPC: Blockhash not found").contains("expired"));
        assert_eq!(parse_rpc_errors("some other error"), "some other error");
    }
}
