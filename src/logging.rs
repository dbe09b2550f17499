//! ログ初期化
//!
//! `RUST_LOG` があればそれに従い、なければ `--verbose` で debug、通常は warn。
//! 出力先は標準エラー（標準出力は一覧やJSONの出力に使う）。

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
