use crate::wallet::Address;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pkvault",
    about = "Encrypt private keys under a helper address and keep them in a local vault"
)]
pub struct Opt {
    #[arg(
        long = "db",
        global = true,
        help = "Record database path (overrides VAULT_DB_PATH)"
    )]
    pub db: Option<String>,
    #[arg(
        long = "passphrase",
        env = "VAULT_PASSPHRASE",
        global = true,
        hide_env_values = true,
        help = "Passphrase sealing the stored helper addresses"
    )]
    pub passphrase: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "generate-key", about = "Generate a fresh 32-byte private key")]
    GenerateKey,
    #[command(name = "generate-helper", about = "Generate a fresh helper address")]
    GenerateHelper,
    #[command(
        name = "derive-key",
        about = "Print the AES-256 key derived from a helper address"
    )]
    DeriveKey {
        #[arg(help = "Helper address (hex, any case)")]
        helper: String,
    },
    #[command(
        name = "encrypt",
        about = "Encrypt a private key under a helper address"
    )]
    Encrypt {
        #[arg(help = "Private key as hex")]
        private_key: String,
        #[arg(
            long = "helper",
            help = "Helper address to encrypt under; a fresh one is generated if omitted"
        )]
        helper: Option<Address>,
    },
    #[command(name = "decrypt", about = "Decrypt a cipher blob with its helper address")]
    Decrypt {
        #[arg(help = "Cipher blob as hex (nonce || ciphertext || tag)")]
        cipher_blob: String,
        #[arg(help = "Helper address the blob was encrypted under")]
        helper: String,
    },
    #[command(
        name = "store",
        about = "Encrypt a private key under a new helper address and store the record"
    )]
    Store {
        #[arg(help = "Owner address")]
        owner: Address,
        #[arg(help = "Private key as hex; a fresh one is generated if omitted")]
        private_key: Option<String>,
    },
    #[command(
        name = "store-cipher",
        about = "Store an already encrypted private key and its helper address"
    )]
    StoreCipher {
        #[arg(help = "Owner address")]
        owner: Address,
        #[arg(help = "Helper address used to encrypt the private key")]
        helper: Address,
        #[arg(help = "Encrypted private key payload as hex")]
        cipher_blob: String,
    },
    #[command(name = "get", about = "Print the encrypted private key of an owner")]
    Get {
        #[arg(help = "Owner address")]
        owner: Address,
        #[arg(long = "json", help = "Print the whole record as JSON")]
        json: bool,
    },
    #[command(
        name = "reveal-helper",
        about = "Unseal the helper address stored for an owner"
    )]
    RevealHelper {
        #[arg(help = "Owner address")]
        owner: Address,
    },
    #[command(
        name = "recover",
        about = "Unseal the helper address and decrypt the stored private key"
    )]
    Recover {
        #[arg(help = "Owner address")]
        owner: Address,
    },
    #[command(name = "has", about = "Check whether an owner has a stored record")]
    Has {
        #[arg(help = "Owner address")]
        owner: Address,
    },
    #[command(name = "clear", about = "Delete the stored record of an owner")]
    Clear {
        #[arg(help = "Owner address")]
        owner: Address,
    },
    #[command(name = "list", about = "Print owners with a stored record")]
    List,
}
