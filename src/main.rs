use clap::Parser;
use app_gallery::{assets, cli, config, error, export, logging, prep, terminal};
use app_gallery_common::{load_catalog, render_catalog, Catalog, CsvTable, DataSource, InfoPanel};
use cli::{Cli, Commands};
use config::Config;
use error::{GalleryError, Result};
use std::path::Path;

// 進捗は標準エラーへ（標準出力は一覧・JSON用）
async fn load(source: &DataSource) -> Result<Catalog> {
    eprintln!("- データを読み込み中: {}", source);
    let result = load_catalog(source).await?;
    let report = &result.report;
    eprintln!(
        "✔ {}件を読み込み（全{}行、URLなし{}行を除外）",
        report.kept_rows(),
        report.total_rows,
        report.dropped_rows.len()
    );
    if !report.duplicate_ids.is_empty() {
        eprintln!("⚠ IDが重複しています: {}", report.duplicate_ids.join(", "));
    }
    Ok(result.into_catalog())
}

// 下ごしらえ用：列構成を保ったまま読み込む
async fn load_table(path: &Path) -> Result<CsvTable> {
    eprintln!("- CSVを読み込み中: {}", path.display());
    let table = CsvTable::read(path).await?;
    if table.is_empty() {
        return Err(GalleryError::EmptyCatalog("CSVにデータ行がありません".into()));
    }
    eprintln!("✔ {}行（列: {}）", table.len(), table.headers().join(", "));
    Ok(table)
}

async fn save_table(table: &CsvTable, path: &Path) -> Result<()> {
    table.write(path).await?;
    println!("✔ CSVを更新しました: {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // 読み込み失敗などはメッセージ1行だけを表示して終了
    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let source = config.data_source(cli.source.as_deref());

    match cli.command {
        Commands::List { json } => {
            let catalog = load(&source).await?;
            let cards = render_catalog(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                println!();
                for card in &cards {
                    let record = &catalog[card.handle.index()];
                    println!("[{}] {} (ID: {})", card.handle.index(), record.name, record.id);
                    if !record.description.is_empty() {
                        println!("    {}", app_gallery_common::gallery::truncate_description(&record.description));
                    }
                    println!("    {}", card.outbound_link);
                }
            }
        }

        Commands::Show { index } => {
            let catalog = load(&source).await?;
            let record = catalog.get(index).ok_or(app_gallery_common::ViewerError::IndexOutOfRange {
                index,
                len: catalog.len(),
            })?;
            let panel = InfoPanel::for_record(record);

            println!("\n{}", panel.name);
            println!("{}", if panel.description.is_empty() { "-" } else { panel.description.as_str() });
            println!("  URL: {}", panel.link);
            if let Some(pdf) = &panel.pdf_link {
                println!("  PDF: {}", pdf);
            }
            if let Some(qr) = &panel.qr_code {
                println!("  QRコード: {}", qr);
            }
            println!("  スクリーンショット: {}", record.screenshot_path);
        }

        Commands::Build { output, title } => {
            println!("🖼 app-gallery - HTML生成\n");
            let catalog = load(&source).await?;
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            let title = title.unwrap_or_else(|| config.page_title.clone());

            let path = export::export_gallery(&catalog, &output, &title)?;
            println!("✔ HTML出力: {}", path.display());
            println!("\n✅ 完了");
        }

        Commands::Browse { index } => {
            let catalog = load(&source).await?;
            terminal::run_browse(catalog, index)?;
        }

        Commands::Assets { root } => {
            let catalog = load(&source).await?;
            let root = root.unwrap_or_else(|| config.asset_root.clone());
            let missing = assets::check_assets(&catalog, &root);

            if missing.is_empty() {
                println!("✓ すべての画像がそろっています");
            } else {
                println!("画像が不足しているアプリ: {}件", missing.len());
                for status in &missing {
                    println!("  [{}] ID: {}", status.index, status.id);
                    if let Some(path) = &status.missing_screenshot {
                        println!("      スクリーンショットなし: {}", path.display());
                    }
                    if let Some(path) = &status.missing_qr_code {
                        println!("      QRコードなし: {}", path.display());
                    }
                }
            }
        }

        Commands::Qrcodes { root } => {
            println!("📱 app-gallery - QRコード生成\n");
            let path = prep::local_csv(&source)?;
            let root = root.unwrap_or_else(|| config.asset_root.clone());
            let mut table = load_table(path).await?;

            let summary = prep::qrcodes::generate_qrcodes(&mut table, &root);
            save_table(&table, path).await?;

            println!("\n成功: {}件", summary.generated.len());
            if !summary.skipped_rows.is_empty() {
                println!("URLなしで飛ばした行: {:?}", summary.skipped_rows);
            }
            for (id, reason) in &summary.failed {
                println!("  ❌ ID {}: {}", id, reason);
            }
            println!("出力先: {}", root.join("images/qrcodes").display());
        }

        Commands::Uuids => {
            let path = prep::local_csv(&source)?;
            let mut table = load_table(path).await?;

            let summary = prep::uuids::fill_uuids(&mut table);
            save_table(&table, path).await?;

            if !summary.removed_columns.is_empty() {
                println!("削除した列: {}", summary.removed_columns.join(", "));
            }
            println!("UUID発行: {}件（既存: {}件）", summary.assigned, summary.kept);
        }

        Commands::Pdfs { root } => {
            println!("📄 app-gallery - PDF列の更新\n");
            let path = prep::local_csv(&source)?;
            let root = root.unwrap_or_else(|| config.asset_root.clone());
            let mut table = load_table(path).await?;

            let summary = prep::pdfs::fill_pdfs(&mut table, &root);
            if summary.renamed_legacy {
                println!("✔ 発表資料の列を「pdf」に改名しました");
            }
            for (id, pdf) in &summary.found {
                println!("  ✅ ID {}: {}", id, pdf);
            }
            for id in &summary.missing {
                println!("  ⚪ ID {}: PDFファイルが見つかりません", id);
            }
            save_table(&table, path).await?;
            println!("PDFが見つかった数: {}件", summary.found.len());
        }

        Commands::Config { set_source, set_title, show } => {
            let mut config = config;

            if let Some(source) = set_source {
                config.set_data_source(source)?;
                println!("✔ 読み込み元を設定しました");
            }

            if let Some(title) = set_title {
                config.set_page_title(title)?;
                println!("✔ ページタイトルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  読み込み元: {}", config.data_source);
                println!("  出力先: {}", config.output_dir.display());
                println!("  ページタイトル: {}", config.page_title);
                println!("  画像の基準ディレクトリ: {}", config.asset_root.display());
            }
        }
    }

    Ok(())
}
