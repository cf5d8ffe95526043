// Entry point for the pkvault CLI
use clap::Parser;
use log::{error, LevelFilter};
use private_key_vault::{
    hexlify, Address, Command, KeyRecordStore, Opt, PassphraseSealer, PrivateKey,
    SymmetricKeyguard, Vault, GLOBAL_CONFIG,
};
use std::process;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    // Info by default, RUST_LOG overrides
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = GLOBAL_CONFIG.load_from_env() {
        error!("Error: {e}");
        process::exit(1);
    }

    // --db wins over file and environment
    if let Some(db) = opt.db.clone() {
        GLOBAL_CONFIG.set_db_path(db);
    }

    if let Err(e) = run_command(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn open_vault(passphrase: Option<&str>) -> CliResult<Vault<PassphraseSealer>> {
    let passphrase = passphrase
        .ok_or("A passphrase is required: pass --passphrase or set VAULT_PASSPHRASE")?;
    let sealer = PassphraseSealer::new(passphrase, GLOBAL_CONFIG.sealer_settings()?)?;
    let store = open_store()?;
    Ok(Vault::new(store, sealer))
}

fn open_store() -> CliResult<KeyRecordStore> {
    Ok(KeyRecordStore::open(GLOBAL_CONFIG.get_db_path())?)
}

fn run_command(opt: Opt) -> CliResult<()> {
    let passphrase = opt.passphrase.as_deref();
    let keyguard = SymmetricKeyguard::new();

    match opt.command {
        Command::GenerateKey => {
            let private_key = PrivateKey::generate(keyguard.provider())?;
            println!("{}", private_key.to_hex());
        }
        Command::GenerateHelper => {
            let helper = Address::generate(keyguard.provider())?;
            println!("{helper}");
        }
        Command::DeriveKey { helper } => {
            let key = keyguard.derive_key(&helper);
            println!("{}", hexlify(key.as_bytes()));
        }
        Command::Encrypt {
            private_key,
            helper,
        } => {
            let private_key = PrivateKey::from_hex(&private_key)?;
            let helper = match helper {
                Some(helper) => helper,
                None => Address::generate(keyguard.provider())?,
            };
            let cipher_blob = keyguard.encrypt(private_key.as_bytes(), &helper.to_string())?;
            println!("Helper address: {helper}");
            println!("Encrypted private key: {cipher_blob}");
        }
        Command::Decrypt {
            cipher_blob,
            helper,
        } => {
            let plaintext = keyguard.decrypt_hex(&cipher_blob, &helper)?;
            println!("{plaintext}");
        }
        Command::Store { owner, private_key } => {
            let vault = open_vault(passphrase)?;
            let private_key = match private_key {
                Some(hex) => PrivateKey::from_hex(&hex)?,
                None => {
                    let generated = PrivateKey::generate(keyguard.provider())?;
                    println!("Generated private key: {}", generated.to_hex());
                    generated
                }
            };
            let stored = vault.store_private_key(&owner, &private_key)?;
            println!("Helper address: {}", stored.helper);
            println!("Encrypted private key: {}", stored.cipher_blob);
            println!("Stored key record for {owner}");
        }
        Command::StoreCipher {
            owner,
            helper,
            cipher_blob,
        } => {
            let vault = open_vault(passphrase)?;
            let bytes = private_key_vault::get_bytes(&cipher_blob)?;
            vault.store_encrypted(&owner, &helper, &bytes)?;
            println!("Stored key record for {owner}");
        }
        Command::Get { owner, json } => {
            let store = open_store()?;
            let record = store.get_key_record(&owner)?;
            if json {
                let view = serde_json::json!({
                    "owner": record.owner,
                    "sealed_helper": hexlify(&record.sealed_helper),
                    "encrypted_private_key": hexlify(&record.encrypted_private_key),
                    "created_at": record.created_at,
                    "updated_at": record.updated_at,
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "Encrypted private key for {owner}: {}",
                    hexlify(&record.encrypted_private_key)
                );
            }
        }
        Command::RevealHelper { owner } => {
            let vault = open_vault(passphrase)?;
            let helper = vault.reveal_helper(&owner)?;
            println!("Decrypted helper address: {helper}");
        }
        Command::Recover { owner } => {
            let vault = open_vault(passphrase)?;
            let private_key = vault.recover_private_key(&owner)?;
            println!("{}", private_key.to_hex());
        }
        Command::Has { owner } => {
            let store = open_store()?;
            println!("{}", store.has_key_record(&owner)?);
        }
        Command::Clear { owner } => {
            let store = open_store()?;
            store.clear_key_record(&owner)?;
            println!("Cleared key record for {owner}");
        }
        Command::List => {
            let store = open_store()?;
            for owner in store.owners()? {
                println!("{owner}")
            }
        }
    }
    Ok(())
}
