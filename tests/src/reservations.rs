mod concurrency;
mod lifecycle;
