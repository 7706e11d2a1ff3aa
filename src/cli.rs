use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "item-ai")]
#[command(about = "画像から出品ドラフトを作成するAIアシスト出品ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で新しい出品を作成
    New {
        /// 画像を選ぶフォルダ（デフォルト: カレント）
        #[arg(short, long, conflicts_with = "image")]
        folder: Option<PathBuf>,

        /// 画像ファイルを直接指定
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 送信レコードの保存先JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 画像を審査・解析してドラフトJSONを出力（非対話）
    Analyze {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力JSONファイル（省略時は標準出力のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 出品カテゴリ一覧を表示
    Categories,

    /// 設定を表示/編集
    Config {
        /// サービスのベースURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// リクエストタイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
