//! CSVを表として読み書きする
//!
//! 正規化とは別経路。列の順序と未知の列をそのまま保ち、
//! 一部の列だけを書き換えて元のファイルへ保存する。

use crate::columns::Column;
use crate::error::{Error, Result};
use crate::loader::{fetch, read_records, DataSource};
use crate::normalizer::record_id;
use std::path::Path;

/// ヘッダーとデータ行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub async fn parse(data: &[u8]) -> Result<Self> {
        let (headers, rows) = read_records(data).await?;
        Ok(Self { headers, rows })
    }

    /// ローカルのCSVファイルを読み込む
    pub async fn read(path: &Path) -> Result<Self> {
        let data = fetch(&DataSource::File(path.to_path_buf())).await?;
        Self::parse(&data).await
    }

    /// ファイルへ書き出す（BOMなしUTF-8）
    ///
    /// 列数の足りない行は空欄で埋める。
    pub async fn write(&self, path: &Path) -> Result<()> {
        let file = tokio::fs::File::create(path).await?;
        let mut writer = csv_async::AsyncWriterBuilder::new()
            .flexible(true)
            .create_writer(file);

        writer
            .write_record(&self.headers)
            .await
            .map_err(|e| Error::Write(e.to_string()))?;
        for row in &self.rows {
            let padding = self.headers.len().saturating_sub(row.len());
            let fields = row.iter().map(String::as_str).chain(std::iter::repeat("").take(padding));
            writer
                .write_record(fields)
                .await
                .map_err(|e| Error::Write(e.to_string()))?;
        }
        writer.flush().await?;

        tracing::info!(path = %path.display(), rows = self.rows.len(), "csv written");
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列の位置（別名も含めて最初に見つかったもの）
    pub fn find(&self, column: Column) -> Option<usize> {
        column
            .headers()
            .iter()
            .find_map(|name| self.find_header(name))
    }

    pub fn find_header(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// 列がなければ `anchor` 列の直後（`anchor` もなければ `fallback`）に追加する
    pub fn ensure_column_after(&mut self, column: Column, anchor: Column, fallback: usize) -> usize {
        if let Some(index) = self.find(column) {
            return index;
        }
        let index = self
            .find(anchor)
            .map(|i| i + 1)
            .unwrap_or(fallback)
            .min(self.headers.len());
        self.insert_column(index, column.header());
        index
    }

    /// 列がなければ末尾に追加する
    pub fn ensure_column_at_end(&mut self, column: Column) -> usize {
        if let Some(index) = self.find(column) {
            return index;
        }
        let index = self.headers.len();
        self.insert_column(index, column.header());
        index
    }

    fn insert_column(&mut self, index: usize, name: &str) {
        self.headers.insert(index, name.to_string());
        for row in &mut self.rows {
            if row.len() >= index {
                row.insert(index, String::new());
            }
        }
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.find_header(from) {
            Some(index) => {
                self.headers[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(index) = self.find_header(name) else {
            return false;
        };
        self.headers.remove(index);
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    /// セルの値（列が足りない行は空文字）
    pub fn get(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|fields| fields.get(column))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, row: usize, column: usize, value: impl Into<String>) {
        let Some(fields) = self.rows.get_mut(row) else {
            return;
        };
        if fields.len() <= column {
            fields.resize(column + 1, String::new());
        }
        fields[column] = value.into();
    }

    /// 列の値（列自体がなければ空文字）
    pub fn value(&self, row: usize, column: Column) -> &str {
        self.find(column).map(|c| self.get(row, c)).unwrap_or_default()
    }

    /// 行のID（カタログと同じ規則：ID列が空なら1始まりの行番号）
    pub fn record_id(&self, row: usize) -> String {
        let raw = self.find(Column::Id).map(|c| self.get(row, c));
        record_id(row + 1, raw)
    }
}
