use pdfcrawl::crawl::execute;

fn main() -> anyhow::Result<()> {
    execute()
}
