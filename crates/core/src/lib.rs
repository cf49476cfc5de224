pub mod corpus;
pub mod error;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod ranker;
pub mod reference;
pub mod session;
pub mod similarity;
pub mod traits;
pub mod vectorize;

pub use corpus::{corpus_key, write_corpus, CorpusFiles};
pub use error::{CorpusError, NormalizeError, ProviderError, SessionError};
pub use models::{
    RankingMetric, RawResult, RelevanceReference, SearchResult, SessionStage,
};
pub use normalize::{decode_text, Normalizer};
pub use providers::GoogleCustomSearchProvider;
pub use ranker::{score_results, sort_by_metric};
pub use reference::build_reference;
pub use session::{LoadReport, Session, SkippedResult, MAX_SELECTIONS};
pub use similarity::{cosine, jaccard};
pub use traits::{fetch_results, ResultSource, MAX_PAGES, PAGE_SIZE};
pub use vectorize::term_frequencies;
