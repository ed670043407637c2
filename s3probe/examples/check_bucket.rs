//! Check a bucket configured through `S3PROBE_*` environment variables.
//!
//! ```shell
//! S3PROBE_PROVIDER=aws S3PROBE_BUCKET=my-bucket \
//! S3PROBE_ACCESS_KEY=... S3PROBE_SECRET_KEY=... \
//! cargo run --example check_bucket
//! ```

use anyhow::Result;
use s3probe::{default_context, join_warnings, BucketCheck, Config, Context, OsEnv};

#[tokio::main]
async fn main() -> Result<()> {
    let env_ctx = Context::new().with_env(OsEnv);
    let (resolved, warnings) = Config::default().from_env(&env_ctx)?.validate()?;

    env_logger::Builder::new()
        .filter_level(resolved.log_level())
        .parse_default_env()
        .init();
    if !warnings.is_empty() {
        eprintln!("{}", join_warnings(&warnings));
    }

    println!(
        "Checking {} ({}) with {}",
        resolved.target,
        resolved.provider.name,
        resolved.auth_type
    );

    let ctx = default_context(&resolved.transport)?;
    let report = BucketCheck::new(ctx, resolved).run().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_pass() {
        std::process::exit(1);
    }
    Ok(())
}
