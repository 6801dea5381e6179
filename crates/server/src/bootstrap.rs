//! Process entry shared by both service binaries.

use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use crate::kind::{ServiceKind, VERSION};

fn init_logging(kind: ServiceKind) {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = kind.name(), event = "logger_init", "tracing subscriber initialized");
}

/// Run the service for `kind` on a fresh tokio runtime and report the outcome.
pub fn launch(kind: ServiceKind) -> ExitCode {
    init_logging(kind);

    let service = kind.name();
    let service_id = Uuid::new_v4();
    let pid = std::process::id();

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let bind = match configs::AppConfig::resolve_for(kind.default_port()) {
        Ok(bind) => bind,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(bind.worker_threads)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version = VERSION,
        threads = bind.worker_threads,
        "service starting"
    );

    match rt.block_on(crate::startup::run(kind, bind)) {
        Ok(()) => {
            info!(service, event = "stop", %service_id, pid, "service stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service, event = "run_failed", error = %e, "service returned error");
            ExitCode::FAILURE
        }
    }
}
