use anyhow::{anyhow, Context, Result};
use gpkg_wkb::GpkgHeader;
use rusqlite::OptionalExtension;
use vesiopas::{
    extract_path, open_read_only, quote_ident, resolve_table, unique_sign_types, Dataset, DatasetKind,
};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let settings = super::load_settings(cli)?;
    let kind = DatasetKind::from(args.kind);
    let tables = settings.extract.tables(kind);

    let conn = open_read_only(&args.gpkg)
        .with_context(|| format!("[inspect] failed to open {}", args.gpkg.display()))?;
    let table = resolve_table(&conn, tables)?
        .ok_or_else(|| anyhow!("[inspect] no {kind} table in {} (tried {})", args.gpkg.display(), tables.join(", ")))?;

    println!("file       {}", args.gpkg.display());
    println!("table      {}", table.name);
    println!("geometry   {}", table.geometry_column);
    println!("key        {}", table.primary_key.as_deref().unwrap_or("(none)"));

    let blob: Option<Vec<u8>> = conn
        .query_row(
            &format!("SELECT {} FROM {} LIMIT 1", quote_ident(&table.geometry_column), quote_ident(&table.name)),
            [],
            |row| row.get::<_, Option<Vec<u8>>>(0),
        )
        .optional()
        .context("[inspect] failed to read the first geometry")?
        .flatten();
    match blob.as_deref().map(GpkgHeader::parse) {
        Some(Ok(header)) => {
            println!("srs id     {}", header.srs_id);
            println!("version    {}", header.version);
            if let Some(envelope) = header.envelope {
                println!(
                    "envelope   x {}..{}  y {}..{} (first row)",
                    envelope.min_x, envelope.max_x, envelope.min_y, envelope.max_y
                );
            }
        }
        Some(Err(err)) => println!("header     not a GeoPackage blob ({err})"),
        None => println!("header     (no rows)"),
    }
    drop(conn);

    let dataset = extract_path(&args.gpkg, kind, &settings.extract)
        .with_context(|| format!("[inspect] failed to decode {}", args.gpkg.display()))?;
    println!("features   {}", dataset.len());
    match dataset {
        Dataset::Restrictions(areas) => {
            let limited = areas.iter().filter(|area| area.speed_limit_kmh.is_some()).count();
            println!("limits     {limited} with a numeric speed limit");
        }
        Dataset::Signs(signs) => {
            let types: Vec<String> = unique_sign_types(&signs).iter().map(i64::to_string).collect();
            println!("types      {}", types.join(", "));
        }
    }
    Ok(())
}
