use crate::core::{AggregateResult, FactGetter, ImageGetter, Servicer};
use crate::utils::error::{CatError, ProviderSide, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fetches a fact and an image concurrently and combines them.
///
/// Both calls share one child token of the caller's token. Whichever call
/// fails first cancels that token so the sibling can stop waiting. When both
/// fail, the fact-side error is reported unless the fact call only failed
/// because it was cancelled while the image call failed for another reason.
pub struct Service {
    img: Arc<dyn ImageGetter>,
    fact: Arc<dyn FactGetter>,
}

impl Service {
    pub fn new(
        image_getter: Option<Arc<dyn ImageGetter>>,
        fact_getter: Option<Arc<dyn FactGetter>>,
    ) -> Result<Self> {
        let img = image_getter.ok_or(CatError::MissingDependency {
            parameter: "image_getter",
        })?;
        let fact = fact_getter.ok_or(CatError::MissingDependency {
            parameter: "fact_getter",
        })?;

        Ok(Self { img, fact })
    }
}

#[async_trait]
impl Servicer for Service {
    async fn get_image_and_fact(&self, ctx: &CancellationToken) -> Result<AggregateResult> {
        let ctx = ctx.child_token();
        // released once both calls have been joined, whatever the outcome
        let _guard = ctx.clone().drop_guard();

        let fact = async {
            let res = self.fact.get_fact(&ctx).await;
            if res.is_err() {
                ctx.cancel();
            }
            res
        };

        let image = async {
            let res = self.img.get_image(&ctx).await;
            if res.is_err() {
                ctx.cancel();
            }
            res
        };

        let (fact, image) = tokio::join!(fact, image);

        match (fact, image) {
            (Ok(fact), Ok(image_url)) => {
                tracing::debug!("Combined image {} with fact", image_url);
                Ok(AggregateResult { image_url, fact })
            }
            // a fact call cut short by the image failure must not mask it
            (Err(fact_err), Err(image_err))
                if fact_err.is_cancelled() && !image_err.is_cancelled() =>
            {
                Err(CatError::Aggregation {
                    side: ProviderSide::Image,
                    source: image_err,
                })
            }
            (Err(source), _) => Err(CatError::Aggregation {
                side: ProviderSide::Fact,
                source,
            }),
            (Ok(_), Err(source)) => Err(CatError::Aggregation {
                side: ProviderSide::Image,
                source,
            }),
        }
    }
}
