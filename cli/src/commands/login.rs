use crate::api::{ApiClient, HttpApi};
use crate::args::{LoginArgs, SignupArgs};
use crate::paths;
use crate::session::{Session, SessionUser};

pub async fn login_cmd(base_url: &str, args: LoginArgs) -> anyhow::Result<()> {
    let api = HttpApi::new(base_url, None);
    let data = api.login(&args.email, &args.password).await?;

    let role = data.role.unwrap_or_else(|| "user".to_string());
    let session = Session {
        token: data.token,
        user: SessionUser {
            name: data.name,
            email: data.email,
            id: data.id,
            role,
        },
    };
    session.save(&paths::session_path())?;

    println!(
        "Logged in as {} ({})",
        session.user.name, session.user.role
    );
    if session.user.is_admin() {
        println!("Admin portal available: slate admin --help");
    }

    Ok(())
}

pub async fn signup_cmd(base_url: &str, args: SignupArgs) -> anyhow::Result<()> {
    let api = HttpApi::new(base_url, None);
    api.signup(&args.name, &args.email, &args.password).await?;

    println!("Account created. Log in with `slate login`.");

    Ok(())
}

pub fn logout_cmd() -> anyhow::Result<()> {
    Session::clear(&paths::session_path())?;
    println!("Logged out.");
    Ok(())
}
