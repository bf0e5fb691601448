pub mod core;
pub mod analysis;
pub mod storage;
pub mod index;
pub mod scoring;
pub mod search;
pub mod builder;
pub mod sql;

/*
┌──────────────────────────────────────────────────────────────────────────────────┐
│                           NAMINGHOUND ARCHITECTURE                               │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────── CORE ────────────────────────────────────────┐
│                                                                                  │
│  ┌──────────────────────────────────────────────────────────────────────────┐    │
│  │ struct Session                                                           │    │
│  │ settings: Arc<RwLock<Settings>>     // Live user configuration           │    │
│  │ repository: Arc<DatasetRepository>  // Current catalog                   │    │
│  │ engine: SearchEngine                // Scoring + result cache            │    │
│  │ builder: NameBuilder                // Selected words + case style       │    │
│  │ columns: ColumnStage                // Staged column DDL                 │    │
│  └──────────────────────────────────────────────────────────────────────────┘    │
│                                                                                  │
│  ┌──────────────────┐  ┌──────────────────┐  ┌─────────────────────────────┐     │
│  │ struct Dataset   │  │ struct Settings  │  │ struct Config               │     │
│  │ • meta           │  │ • dbDialect      │  │ • default_limit             │     │
│  │ • terms          │  │ • mergePolicy    │  │ • fuzzy_threshold / weight  │     │
│  │ • words          │  │ • caseStyle      │  │ • term / word / domain boost│     │
│  │ • domains        │  │ • customJson     │  │ • search_cache_size         │     │
│  └──────────────────┘  └──────────────────┘  └─────────────────────────────┘     │
└──────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── STORAGE ──────────────────────────────────────┐
│                                                                                  │
│  ResourceSource ──read──> ResourceDatasetLoader ──parse──> Dataset (base)        │
│  custom JSON ──validate──> DatasetValidator                                      │
│  custom JSON ──parse──> CustomDatasetLoader ──> Dataset (override)               │
│  DatasetMerger(base, override, MergePolicy) ──> Dataset (merged)                 │
│  DatasetRepository ──publishes──> Arc<Catalog { version, dataset, index }>       │
│  DatasetExporter ──writes──> zip(terms.json, words.json, domains.json)           │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INDEX / SEARCH ──────────────────────────────────┐
│                                                                                  │
│  SearchIndexBuilder ──builds──> SearchIndex ──contains──> SearchEntry            │
│                                                   │                              │
│                                                   └──> Arc<SearchItem>           │
│                                                          (PayloadRef → Dataset)  │
│                                                                                  │
│  SearchEngine ──detects──> Script ──normalizes──> query                          │
│       ├──scores_with──> TieredScorer / BigramScorer ──implements──> Scorer       │
│       ├──ranks_with──> TopKCollector                                             │
│       └──caches_in──> SearchCache (LRU, keyed by catalog version)                │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────── OUTPUT ──────────────────────────────────────┐
│                                                                                  │
│  NameBuilder ──renders──> CaseStyle ──> identifier                               │
│  ColumnStage ──uses──> SqlGenerator ──maps──> Domain × DbDialect ──> column DDL  │
└──────────────────────────────────────────────────────────────────────────────────┘
*/
