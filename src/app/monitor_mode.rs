// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use sessionwatch::auth::memory::InMemoryAuth;
use sessionwatch::{ActivityBus, MonitorError, SessionHandle, SessionMonitor, User};

use crate::app::console::{self, ConsoleCmd, ConsoleHost};
use crate::cli::Args;

struct Console {
    handle: SessionHandle,
    auth: Arc<InMemoryAuth>,
    bus: ActivityBus,
}

pub async fn run(args: &Args, user: Option<String>) -> Result<()> {
    let log_path = if args.no_log_file {
        None
    } else {
        crate::app::platform::default_log_path()
    };
    crate::session_log::init(args.verbose, log_path.as_deref())?;

    tracing::info!("sessionwatch starting");

    let loaded = sessionwatch::config::load(args.config.as_deref()).map_err(|e| {
        tracing::error!("{e}");
        e
    })?;

    match &loaded.path {
        Some(path) => tracing::info!("using config {}", path.display()),
        None => tracing::info!("using built-in defaults"),
    }

    let auth = Arc::new(match user {
        Some(name) => InMemoryAuth::signed_in(User::new(name)),
        None => InMemoryAuth::new(),
    });
    let bus = ActivityBus::new();

    let monitor = SessionMonitor::new(loaded.cfg, auth.clone(), Arc::new(ConsoleHost), bus.clone())?;
    let (handle, task) = monitor.spawn();

    let console = Console {
        handle: handle.clone(),
        auth,
        bus,
    };

    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed, shutting down");
                    break;
                };

                match console::parse_line(&line) {
                    Ok(Some(cmd)) => {
                        if !console.execute(cmd).await? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("sessionwatch: {e}"),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received Ctrl+C, shutting down");
                handle.request_shutdown();
                break;
            }
        }
    }

    handle.teardown().await?;
    task.await?;

    Ok(())
}

impl Console {
    /// Run one command. Returns `false` when the console should exit.
    async fn execute(&self, cmd: ConsoleCmd) -> Result<bool> {
        match cmd {
            ConsoleCmd::Activity(kind) => {
                if self.bus.dispatch(kind) == 0 {
                    tracing::debug!("{} ignored: no active listener", kind);
                }
            }

            ConsoleCmd::Extend => report(self.handle.extend_session().await)?,

            ConsoleCmd::Logout => report(self.handle.logout().await)?,

            ConsoleCmd::Info { json } => {
                let info = self.handle.session_info().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!("{}", info.pretty_text);
                }
            }

            ConsoleCmd::Revoke => {
                self.auth.revoke();
                println!("session revoked server-side; takes effect on the next validity check");
            }

            ConsoleCmd::SignIn(name) => {
                let user = User::new(name);
                self.auth.set_user(Some(user.clone()));
                self.handle.set_user(Some(user)).await?;
            }

            ConsoleCmd::SignOut => {
                self.auth.set_user(None);
                self.handle.set_user(None).await?;
            }

            ConsoleCmd::Help => println!("{}", console::HELP),

            ConsoleCmd::Quit => return Ok(false),
        }

        Ok(true)
    }
}

/// Print rejections, propagate a dead monitor.
fn report(res: Result<(), MonitorError>) -> Result<()> {
    match res {
        Ok(()) => Ok(()),
        Err(MonitorError::Rejected(e)) => {
            println!("sessionwatch: {e}");
            Ok(())
        }
        Err(e @ MonitorError::Closed) => Err(e.into()),
    }
}
