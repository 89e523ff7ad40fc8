use crate::config::CaptureConfig;
use crate::tools::bitmap::Bitmap;
use crate::tools::lru_cache::LruCache;
use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 快取中的一筆縮圖
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub bitmap: Bitmap,
    pub timestamp: i64,
}

/// 快取統計；只供觀測，不影響淘汰決策
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub max_size: usize,
    pub approx_bytes: u64,
}

#[derive(Debug)]
struct Inner {
    lru: LruCache<String, CacheEntry>,
    hits: u64,
    misses: u64,
    evictions: u64,
    approx_bytes: u64,
}

/// 縮圖快取
///
/// 固定容量、純容量驅動的 LRU 淘汰，沒有時效過期。
/// 可能同時從多個工作完成回呼寫入，內部以單一互斥鎖同步；
/// 工作元件不直接寫入快取，由接收結果的消費端決定是否存放
#[derive(Debug)]
pub struct ThumbnailCache {
    inner: Mutex<Inner>,
    max_size: usize,
}

impl ThumbnailCache {
    /// 建立快取
    ///
    /// # Panics
    ///
    /// `max_size` 為 0 時 panic
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                lru: LruCache::new(max_size),
                hits: 0,
                misses: 0,
                evictions: 0,
                approx_bytes: 0,
            }),
            max_size,
        }
    }

    #[must_use]
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(config.cache_capacity)
    }

    /// 讀取縮圖；命中時刷新存取序並回傳共享握把的複本
    pub fn get(&self, key: &str) -> Option<Bitmap> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let hit = inner.lru.get(key).map(|entry| entry.bitmap.clone());
        match hit {
            Some(bitmap) => {
                inner.hits += 1;
                Some(bitmap)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// 寫入縮圖；鍵已存在時取代並刷新存取序，
    /// 容量已滿時先淘汰最久未存取的一筆
    pub fn put(&self, key: impl Into<String>, bitmap: Bitmap, timestamp: i64) {
        let key = key.into();
        let bytes = bitmap.byte_size() as u64;

        let mut guard = self.lock();
        let inner = &mut *guard;

        let displaced = inner.lru.put(key.clone(), CacheEntry { bitmap, timestamp });
        inner.approx_bytes += bytes;

        if let Some((old_key, old_entry)) = displaced {
            inner.approx_bytes = inner
                .approx_bytes
                .saturating_sub(old_entry.bitmap.byte_size() as u64);
            if old_key != key {
                inner.evictions += 1;
                debug!("淘汰縮圖快取項目: {old_key}");
            }
        }
    }

    /// 移除一筆縮圖；存在時回傳 true
    pub fn remove(&self, key: &str) -> bool {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.lru.remove(key) {
            inner.approx_bytes = inner
                .approx_bytes
                .saturating_sub(entry.bitmap.byte_size() as u64);
            true
        } else {
            false
        }
    }

    pub fn clear(&self) {
        let mut guard = self.lock();
        guard.lru.clear();
        guard.approx_bytes = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().lru.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().lru.is_empty()
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let guard = self.lock();
        CacheStats {
            hits: guard.hits,
            misses: guard.misses,
            evictions: guard.evictions,
            len: guard.lru.len(),
            max_size: self.max_size,
            approx_bytes: guard.approx_bytes,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
