//
//  pantry-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! The token returned by `login` is kept in the configured session store
//! (a file in the data directory, or the system keyring) together with a
//! cached copy of the profile.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{AccountVerification, Credentials, ProfileChanges, Registration};
use crate::context::AppContext;
use crate::interactive::{
    prompt_input, prompt_input_optional, prompt_password, prompt_password_confirm, value_or_prompt,
};
use crate::util::{mask_token, read_line_from_stdin};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with email and password
    Login(LoginArgs),

    /// Log out and forget the stored token
    Logout,

    /// Show who is logged in and where
    Status(StatusArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Confirm an account with the code sent by email
    Verify(VerifyArgs),

    /// Show or update your profile
    Profile(ProfileArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from standard input
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the full token instead of a masked one
    #[arg(long, short = 't')]
    pub show_token: bool,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from standard input
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Verification code from the email
    #[arg(long, short = 'c')]
    pub code: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// New first name
    #[arg(long)]
    pub name: Option<String>,

    /// New surname
    #[arg(long)]
    pub surname: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        match &self.command {
            AuthSubcommand::Login(args) => login(&ctx, args).await,
            AuthSubcommand::Logout => logout(&ctx).await,
            AuthSubcommand::Status(args) => status(&ctx, args),
            AuthSubcommand::Register(args) => register(&ctx, args).await,
            AuthSubcommand::Verify(args) => verify(&ctx, args).await,
            AuthSubcommand::Profile(args) => profile(&ctx, args).await,
        }
    }
}

fn read_password(from_stdin: bool, confirm: bool) -> Result<String> {
    let password = if from_stdin {
        read_line_from_stdin()?
    } else if confirm {
        prompt_password_confirm("Password")?
    } else {
        prompt_password("Password")?
    };
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    Ok(password)
}

async fn login(ctx: &AppContext, args: &LoginArgs) -> Result<()> {
    let email = value_or_prompt(args.email.as_deref(), "Email")?;
    let password = read_password(args.password_stdin, false)?;

    let auth = ctx
        .client
        .login(&Credentials::new(email.trim(), password))
        .await
        .context("Login failed")?;

    let token = auth
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| anyhow::anyhow!("The server did not return a token"))?;

    ctx.session
        .establish(&token, auth.user.as_ref())
        .context("Failed to store the session")?;

    let user = match auth.user {
        Some(user) => Some(user),
        None => match ctx.client.get_profile().await {
            Ok(user) => {
                if let Err(e) = ctx.session.set_user(&user) {
                    tracing::warn!(error = %e, "Could not cache profile");
                }
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logged in but could not load the profile");
                None
            }
        },
    };

    if ctx.output.is_json() {
        let result = serde_json::json!({
            "success": true,
            "user": user,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let who = user.map(|u| u.display_name()).unwrap_or(email);
        ctx.output.write_success(&format!("Logged in as {}", who));
    }

    Ok(())
}

async fn logout(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        ctx.output.write_info("Not logged in");
        return Ok(());
    }

    if let Err(e) = ctx.client.logout().await {
        tracing::warn!(error = %e, "Server-side logout failed");
        ctx.output
            .write_warning(&format!("The server did not confirm the logout: {}", e));
    }

    ctx.session.clear().context("Failed to clear the session")?;
    ctx.output.write_success("Logged out");
    Ok(())
}

fn status(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    let token = ctx.session.token();
    let user = ctx.session.user();
    let shown_token = token.as_deref().map(|token| {
        if args.show_token {
            token.to_string()
        } else {
            mask_token(token)
        }
    });

    if ctx.output.is_json() {
        let result = serde_json::json!({
            "api_url": ctx.client.base_url(),
            "logged_in": token.is_some(),
            "user": user,
            "token": shown_token,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Server: {}", ctx.client.base_url());
    match shown_token {
        Some(shown_token) => {
            match user {
                Some(user) => println!("Logged in as {}", user.display_name()),
                None => println!("Logged in"),
            }
            println!("Token: {}", shown_token);
        }
        None => println!("Not logged in. Run '{} auth login'.", crate::APP_NAME),
    }

    Ok(())
}

async fn register(ctx: &AppContext, args: &RegisterArgs) -> Result<()> {
    let name = value_or_prompt(args.name.as_deref(), "First name")?;
    let surname = match &args.surname {
        Some(surname) => surname.clone(),
        None => prompt_input_optional("Surname")?.unwrap_or_default(),
    };
    let email = value_or_prompt(args.email.as_deref(), "Email")?;
    let password = read_password(args.password_stdin, true)?;

    let ack = ctx
        .client
        .register(&Registration {
            name,
            surname,
            email: email.trim().to_string(),
            password,
            metadata: None,
        })
        .await
        .context("Registration failed")?;

    if ctx.output.is_json() {
        return ctx.output.write(&ack);
    }

    ctx.output.write_success(
        ack.message
            .as_deref()
            .unwrap_or("Account created. Check your email for a verification code."),
    );
    ctx.output.write_info(&format!(
        "Then run '{} auth verify --email {}'",
        crate::APP_NAME,
        email.trim()
    ));
    Ok(())
}

async fn verify(ctx: &AppContext, args: &VerifyArgs) -> Result<()> {
    let email = value_or_prompt(args.email.as_deref(), "Email")?;
    let code = match &args.code {
        Some(code) => code.clone(),
        None => prompt_input("Verification code")?,
    };

    let ack = ctx
        .client
        .verify_account(&AccountVerification {
            email: email.trim().to_string(),
            code: code.trim().to_string(),
        })
        .await
        .context("Verification failed")?;

    if ctx.output.is_json() {
        return ctx.output.write(&ack);
    }
    ctx.output
        .write_success(ack.message.as_deref().unwrap_or("Account verified"));
    Ok(())
}

async fn profile(ctx: &AppContext, args: &ProfileArgs) -> Result<()> {
    ctx.require_auth()?;

    let user = if args.name.is_some() || args.surname.is_some() {
        let changes = ProfileChanges {
            name: args.name.clone(),
            surname: args.surname.clone(),
            metadata: None,
        };
        ctx.client
            .update_profile(&changes)
            .await
            .context("Failed to update profile")?
    } else {
        ctx.client
            .get_profile()
            .await
            .context("Failed to load profile")?
    };

    if let Err(e) = ctx.session.set_user(&user) {
        tracing::warn!(error = %e, "Could not cache profile");
    }

    ctx.output.write(&user)
}
