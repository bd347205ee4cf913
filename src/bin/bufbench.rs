use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use bufpool::dbms::buffer::pool_manager::BufferPoolManager;
use bufpool::dbms::buffer::replacer::ReplacerAlgorithm;
use bufpool::dbms::storage::disk::{FileDiskManager, IDiskManager};
use bufpool::dbms::types::{PageId, BUFFER_POOL_SIZE};

/// Page span of the reference trace. The store is grown to cover it before
/// the run so every trace id is readable by plain fixes.
const TRACE_PAGE_SPAN: usize = 50_000;

fn usage() -> ! {
    println!("error: wrong format, please use");
    println!("    bufbench [lru|mru|random|clock|lru-2|2q]");
    process::exit(1);
}

fn parse_trace_line(line: &str) -> Result<(bool, PageId)> {
    let (is_write, page_id) = line
        .split_once(',')
        .context("expected an is_write,page_id pair")?;
    let is_write = is_write.trim().parse::<u32>().context("bad write flag")? != 0;
    let page_id = page_id.trim().parse::<PageId>().context("bad page id")?;
    Ok((is_write, page_id))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        usage();
    }
    let algorithm: ReplacerAlgorithm = match args[1].parse() {
        Ok(algorithm) => algorithm,
        Err(_) => usage(),
    };

    let data_path =
        PathBuf::from(env::var("BUFBENCH_DATA").unwrap_or_else(|_| "data/data.dbf".to_string()));
    let trace_path = PathBuf::from(
        env::var("BUFBENCH_TRACE").unwrap_or_else(|_| "data/data-5w-50w-zipf.txt".to_string()),
    );

    let mut disk_manager = FileDiskManager::open(&data_path)
        .with_context(|| format!("opening page store {}", data_path.display()))?;
    if disk_manager.page_count() < TRACE_PAGE_SPAN {
        info!("growing page store to {} pages", TRACE_PAGE_SPAN);
        while disk_manager.page_count() < TRACE_PAGE_SPAN {
            disk_manager.grow_by_one_page()?;
        }
    }
    // The report covers trace I/O only, not the store setup above.
    disk_manager.reset_io_count();

    let mut pool = BufferPoolManager::new(
        BUFFER_POOL_SIZE,
        algorithm.create(BUFFER_POOL_SIZE),
        Box::new(disk_manager),
    );

    let trace =
        File::open(&trace_path).with_context(|| format!("opening trace {}", trace_path.display()))?;

    let started = Instant::now();
    for line in BufReader::new(trace).lines() {
        let line = line.with_context(|| format!("reading trace {}", trace_path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (is_write, page_id) =
            parse_trace_line(line).with_context(|| format!("bad trace line {:?}", line))?;
        pool.fix_page(page_id, is_write)
            .with_context(|| format!("fixing page {}", page_id))?;
        pool.unfix_page(page_id)
            .with_context(|| format!("unfixing page {}", page_id))?;
    }
    let elapsed = started.elapsed();

    // I/O is reported before the teardown flush, so the figure reflects the
    // replacement policy's behavior during the run.
    let io_count = pool.io_count();
    println!("{}: ", algorithm);
    println!("    access count: {}", pool.access_count());
    println!("    hit count: {}", pool.hit_count());
    println!("    hit rate: {}", pool.hit_rate());
    println!("    io count: {}", io_count);
    println!("    time: {}s", elapsed.as_secs_f64());

    pool.flush_all_pages().context("flushing dirty pages")?;
    Ok(())
}
