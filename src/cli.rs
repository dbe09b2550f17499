use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "app-gallery")]
#[command(about = "アプリギャラリーの生成・閲覧ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// CSVの読み込み元（ファイルパスまたはURL、省略時は設定値）
    #[arg(long, global = true)]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カード一覧を表示
    List {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 指定アプリの詳細パネルを表示
    Show {
        /// アプリの位置（0始まり）
        #[arg(required = true)]
        index: usize,
    },

    /// 静的HTMLギャラリーを生成
    Build {
        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ページタイトル（省略時は設定値）
        #[arg(short, long)]
        title: Option<String>,
    },

    /// 端末上でギャラリーを閲覧
    Browse {
        /// 最初に開くアプリの位置（省略時は一覧から選択）
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// スクリーンショット・QRコード画像の有無を確認
    Assets {
        /// 画像パスの基準ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// URLからQRコード画像を生成し、QRコード列に書き戻す
    Qrcodes {
        /// 画像の保存先の基準ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// 空のUUIDを発行して書き戻す（メール・名前列は削除）
    Uuids,

    /// IDに対応するPDFを探してpdf列に書き戻す
    Pdfs {
        /// PDFを探す基準ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 読み込み元を設定
        #[arg(long)]
        set_source: Option<String>,

        /// ページタイトルを設定
        #[arg(long)]
        set_title: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
