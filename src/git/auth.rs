//! Git authentication for fetches during change detection
//!
//! An explicit access token wins for HTTPS remotes. Without one,
//! authentication is delegated to git's native credential system:
//! - SSH agent and keys from ~/.ssh/
//! - Git credential helpers

use git2::{Cred, CredentialType, Error, ErrorClass, RemoteCallbacks};

/// Username paired with a token for HTTPS basic auth (GitHub convention)
const TOKEN_USERNAME: &str = "x-access-token";

fn auth_error(message: &str) -> Error {
    Error::new(git2::ErrorCode::Auth, ErrorClass::Http, message)
}

fn try_ssh_credentials(username: &str) -> std::result::Result<Cred, git2::Error> {
    let home = dirs::home_dir().unwrap_or_default();
    let ssh_dir = home.join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        let public_key = ssh_dir.join(format!("{key_name}.pub"));

        if !private_key.exists() {
            continue;
        }

        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error("SSH key not found"))
}

fn try_credential_helper(
    url: &str,
    username_from_url: Option<&str>,
) -> std::result::Result<Cred, git2::Error> {
    let config = match git2::Config::open_default() {
        Ok(cfg) => cfg,
        Err(_) => git2::Config::new()?,
    };

    Cred::credential_helper(&config, url, username_from_url)
        .or_else(|_| Cred::userpass_plaintext("", ""))
}

/// Set up credential callbacks for a fetch
pub fn setup_auth_callbacks<'cb>(callbacks: &mut RemoteCallbacks<'cb>, token: Option<&'cb str>) {
    let mut attempts = 0u8;
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        // libgit2 keeps asking while credentials are rejected
        attempts += 1;
        if attempts > 3 {
            return Err(auth_error("authentication failed"));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(token) = token {
                return Cred::userpass_plaintext(TOKEN_USERNAME, token);
            }
            return try_credential_helper(url, username_from_url);
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| try_ssh_credentials(username));
        }

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        Err(auth_error("authentication failed"))
    });
}
