use crate::output::OutputWriter;
use crate::output_types::CropRow;
use anyhow::Result;
use geogrow_core::ports::ReferenceData;

pub fn execute(data: &dyn ReferenceData, output: &OutputWriter) -> Result<()> {
    let popular = data.popular_crops();
    let rows: Vec<CropRow> = data
        .crops()
        .into_iter()
        .map(|crop| CropRow::new(crop, popular.contains(&crop.id)))
        .collect();

    output.table(rows)
}
