//! 結合テスト共通: 呼び出しを記録するフェイクサービスとテスト画像

#![allow(dead_code)]

use async_trait::async_trait;
use item_ai_common::{AnalysisAttributes, ModerationVerdict};
use item_ai_rust::error::{ItemAiError, Result};
use item_ai_rust::picker::{ImagePicker, PickOutcome};
use item_ai_rust::service::ListingService;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    TransportFail,
    ParseFail,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::TransportFail => Err(ItemAiError::Transport("HTTP 503: unavailable".into())),
            Reply::ParseFail => Err(ItemAiError::ApiParse("JSONが見つかりません".into())),
        }
    }
}

pub struct FakeService {
    pub moderation: Reply<bool>,
    pub analysis: Reply<AnalysisAttributes>,
    pub moderate_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    pub payloads: Mutex<Vec<String>>,
    /// 最初のN回の解析を失敗させる
    pub analysis_failures_left: AtomicUsize,
}

impl FakeService {
    pub fn new(moderation: Reply<bool>, analysis: Reply<AnalysisAttributes>) -> Self {
        Self {
            moderation,
            analysis,
            moderate_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            analysis_failures_left: AtomicUsize::new(0),
        }
    }

    pub fn approving(analysis: AnalysisAttributes) -> Self {
        Self::new(Reply::Ok(true), Reply::Ok(analysis))
    }

    /// 承認した上で、解析だけ最初の `failures` 回は通信失敗にする
    pub fn flaky_analysis(failures: usize, analysis: AnalysisAttributes) -> Self {
        let service = Self::approving(analysis);
        service.analysis_failures_left.store(failures, Ordering::SeqCst);
        service
    }

    pub fn moderate_count(&self) -> usize {
        self.moderate_calls.load(Ordering::SeqCst)
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingService for FakeService {
    async fn moderate(&self, image_base64: &str) -> Result<ModerationVerdict> {
        self.moderate_calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(image_base64.to_string());
        self.moderation.get().map(|ok| ModerationVerdict { is_appropriate: ok })
    }

    async fn analyze(&self, image_base64: &str) -> Result<AnalysisAttributes> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(image_base64.to_string());
        let failing = self
            .analysis_failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Reply::<AnalysisAttributes>::TransportFail.get();
        }
        self.analysis.get()
    }
}

/// 決まった結果を順に返すピッカー
pub struct ScriptedPicker {
    outcomes: Vec<PickOutcome>,
}

impl ScriptedPicker {
    pub fn new(outcomes: Vec<PickOutcome>) -> Self {
        // pop() で先頭から返すため逆順に保持
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self { outcomes }
    }
}

impl ImagePicker for ScriptedPicker {
    fn pick(&mut self) -> Result<PickOutcome> {
        Ok(self.outcomes.pop().unwrap_or(PickOutcome::Cancelled))
    }
}

pub fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(w, h).save(&path).unwrap();
    path
}

pub fn tent_analysis() -> AnalysisAttributes {
    AnalysisAttributes {
        item_name: Some("Camping Tent".into()),
        condition: Some("Good".into()),
        description: Some("4-person dome tent".into()),
        price_range: Some("$50-$80".into()),
        category: Some("Outdoor Recreation".into()),
    }
}
