pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS Licenses (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL UNIQUE,
  link TEXT,
  spdxIdentifier TEXT
);

CREATE TABLE IF NOT EXISTS Families (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  folderName TEXT NOT NULL UNIQUE,
  date TEXT,
  firstOccurrence TEXT,
  benchmarkCount INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS Benchmarks (
  id INTEGER PRIMARY KEY,
  family INTEGER NOT NULL REFERENCES Families(id),
  logic TEXT NOT NULL,
  name TEXT NOT NULL,
  isIncremental BOOL NOT NULL,
  size INTEGER,
  compressedSize INTEGER,
  license INTEGER REFERENCES Licenses(id),
  generatedBy TEXT,
  generator TEXT,
  application TEXT,
  description TEXT,
  category TEXT NOT NULL,
  checkLenient TEXT NOT NULL,
  checkStrict TEXT NOT NULL,
  queryCount INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_benchmarks_name ON Benchmarks(name);

CREATE TABLE IF NOT EXISTS Queries (
  id INTEGER PRIMARY KEY,
  benchmark INTEGER NOT NULL REFERENCES Benchmarks(id),
  idx INTEGER NOT NULL,
  normalizedSize INTEGER,
  compressedSize INTEGER,
  defineFunCount INTEGER,
  maxTermDepth INTEGER,
  numSexps INTEGER,
  status TEXT NOT NULL,
  inferredStatus TEXT
);
CREATE INDEX IF NOT EXISTS idx_queries_benchmark ON Queries(benchmark);

CREATE TABLE IF NOT EXISTS Logics (
  logic TEXT PRIMARY KEY,
  quantifierFree BOOL NOT NULL,
  arrays BOOL NOT NULL,
  uninterpretedFunctions BOOL NOT NULL,
  bitvectors BOOL NOT NULL,
  floatingPoint BOOL NOT NULL,
  dataTypes BOOL NOT NULL,
  strings BOOL NOT NULL,
  nonLinear BOOL NOT NULL,
  difference BOOL NOT NULL,
  reals BOOL NOT NULL,
  integers BOOL NOT NULL
);

CREATE TABLE IF NOT EXISTS Solvers (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL UNIQUE,
  link TEXT
);

CREATE TABLE IF NOT EXISTS Evaluations (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  date TEXT,
  link TEXT
);

-- evaluation is NULL for global variant names (target-solver aliases),
-- non-NULL for names submitted to one competition.
CREATE TABLE IF NOT EXISTS SolverVariants (
  id INTEGER PRIMARY KEY,
  fullName TEXT NOT NULL,
  solver INTEGER NOT NULL REFERENCES Solvers(id),
  evaluation INTEGER REFERENCES Evaluations(id)
);
CREATE INDEX IF NOT EXISTS idx_variants_evaluation ON SolverVariants(evaluation);

CREATE TABLE IF NOT EXISTS Results (
  id INTEGER PRIMARY KEY,
  evaluation INTEGER NOT NULL REFERENCES Evaluations(id),
  query INTEGER NOT NULL REFERENCES Queries(id),
  solverVariant INTEGER NOT NULL REFERENCES SolverVariants(id),
  status TEXT NOT NULL,
  cpuTime REAL,
  wallclockTime REAL
);
CREATE INDEX IF NOT EXISTS idx_results_query ON Results(query);
CREATE INDEX IF NOT EXISTS idx_results_evaluation ON Results(evaluation);

CREATE TABLE IF NOT EXISTS Ratings (
  id INTEGER PRIMARY KEY,
  query INTEGER NOT NULL REFERENCES Queries(id),
  evaluation INTEGER NOT NULL REFERENCES Evaluations(id),
  rating REAL NOT NULL,
  consideredSolvers INTEGER NOT NULL,
  successfulSolvers INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_ratings_evaluation ON Ratings(evaluation);

CREATE TABLE IF NOT EXISTS Symbols (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS SymbolCounts (
  symbol INTEGER NOT NULL REFERENCES Symbols(id),
  query INTEGER NOT NULL REFERENCES Queries(id),
  count INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS TargetSolvers (
  query INTEGER NOT NULL REFERENCES Queries(id),
  solver INTEGER NOT NULL REFERENCES Solvers(id)
);
"#;
