use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector compiled on first use and reused for the life of the
/// process. `Selector::parse` is not const, so the compiled form lives
/// behind a `OnceLock`.
#[derive(Debug)]
pub(super) struct CachedSelector {
    source: &'static str,
    compiled: OnceLock<Selector>,
}

impl CachedSelector {
    pub(super) const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }
}

impl core::ops::Deref for CachedSelector {
    type Target = Selector;

    fn deref(&self) -> &Selector {
        self.compiled.get_or_init(|| {
            Selector::parse(self.source)
                .unwrap_or_else(|e| panic!("invalid selector {:?}: {e:?}", self.source))
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($name: ident <- $source: literal) => {
        static $name: $crate::parse::static_selector::CachedSelector =
            $crate::parse::static_selector::CachedSelector::new($source);
    };
}
