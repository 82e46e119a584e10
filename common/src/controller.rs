//! 試着処理のオーケストレーション
//!
//! Idle → Validating → Charging → Uploading → Generating → Displaying | Refunding → Idle
//!
//! クレジットは通信前に1消費し、アップロードまたは生成が失敗した場合は
//! 理由にかかわらず1返却する。どの経路でも最後は Idle に戻す。

use crate::client::{CancelToken, Clock, ImageHost, TryOnBackend};
use crate::credits::CreditStore;
use crate::error::{Result, TryOnError};
use crate::phase::{Outcome, Phase, TryOnView};
use crate::storage::KeyValueStorage;
use crate::wire::GenerationRequest;

/// 2枚の画像が揃っていない場合のメッセージ
pub const MISSING_IMAGES_MESSAGE: &str = "人物画像と衣服画像の両方を選択してください";

/// 試着処理1回分の入力
#[derive(Debug, Clone)]
pub struct TryOnInput<F> {
    pub person: Option<F>,
    pub clothing: Option<F>,
    /// 衣服カテゴリ（検証せずに送る）
    pub category: String,
}

pub struct TryOnController<S, H, B, C> {
    credits: CreditStore<S>,
    host: H,
    backend: B,
    clock: C,
    security_key: String,
}

impl<S, H, B, C> TryOnController<S, H, B, C>
where
    S: KeyValueStorage,
    H: ImageHost,
    B: TryOnBackend,
    C: Clock,
{
    pub fn new(
        credits: CreditStore<S>,
        host: H,
        backend: B,
        clock: C,
        security_key: impl Into<String>,
    ) -> Self {
        Self {
            credits,
            host,
            backend,
            clock,
            security_key: security_key.into(),
        }
    }

    pub fn credits(&self) -> &CreditStore<S> {
        &self.credits
    }

    /// 試着処理を開始する
    pub async fn start_try_on<V: TryOnView>(
        &self,
        input: &TryOnInput<H::File>,
        view: &mut V,
        cancel: &CancelToken,
    ) -> Outcome {
        view.set_phase(&Phase::Validating);

        if self.credits.get() <= 0 {
            tracing::info!(balance = self.credits.get(), "残高不足のため料金表を表示");
            view.open_pricing();
            view.set_phase(&Phase::Idle);
            return Outcome::PricingRequired;
        }

        let (Some(person), Some(clothing)) = (input.person.as_ref(), input.clothing.as_ref())
        else {
            let error = TryOnError::Validation(MISSING_IMAGES_MESSAGE.to_string());
            return self.reject(error, view);
        };

        view.set_phase(&Phase::Charging);
        match self.credits.adjust(-1) {
            Ok(balance) => view.show_balance(balance, self.credits.tone()),
            Err(e) => return self.reject(e, view),
        }

        let outcome = match self
            .run_remote(person, clothing, &input.category, view, cancel)
            .await
        {
            Ok(result_url) => {
                tracing::info!(%result_url, "試着画像生成完了");
                view.set_phase(&Phase::Displaying { result_url: result_url.clone() });
                Outcome::Generated { result_url }
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "試着処理失敗、クレジットを返却");
                view.set_phase(&Phase::Refunding { message: message.clone() });
                view.alert(&format!("エラー: {}", message));
                self.refund(view);
                Outcome::Refunded { message }
            }
        };

        view.set_phase(&Phase::Idle);
        outcome
    }

    /// 2枚を並行アップロードし、生成APIを呼ぶ
    ///
    /// どちらかのアップロードが失敗した時点で全体を失敗とする。
    async fn run_remote<V: TryOnView>(
        &self,
        person: &H::File,
        clothing: &H::File,
        category: &str,
        view: &mut V,
        cancel: &CancelToken,
    ) -> Result<String> {
        cancel.check()?;
        view.set_phase(&Phase::Uploading);
        let (person_url, clothing_url) = futures::future::try_join(
            self.host.upload(person, cancel),
            self.host.upload(clothing, cancel),
        )
        .await?;
        tracing::debug!(%person_url, %clothing_url, "アップロード完了");

        cancel.check()?;
        view.set_phase(&Phase::Generating);
        let request = GenerationRequest::new(
            person_url,
            clothing_url,
            category,
            self.clock.now_millis(),
            self.security_key.as_str(),
        );
        self.backend.generate(&request, cancel).await
    }

    fn reject<V: TryOnView>(&self, error: TryOnError, view: &mut V) -> Outcome {
        let message = error.user_message();
        tracing::debug!(%message, "課金前に中止");
        view.alert(&message);
        view.set_phase(&Phase::Idle);
        Outcome::Rejected { message }
    }

    fn refund<V: TryOnView>(&self, view: &mut V) {
        match self.credits.adjust(1) {
            Ok(balance) => view.show_balance(balance, self.credits.tone()),
            Err(e) => tracing::error!(error = %e, "クレジット返却の保存に失敗"),
        }
    }
}
