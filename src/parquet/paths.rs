//! Save segmented track paths to a parquet file, one row per fix.

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, Float64Array, Int64Array, StringArray, TimestampSecondArray, UInt32Array},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use parquet::{
    arrow::ArrowWriter,
    basic::{Compression, ZstdLevel},
    file::properties::WriterProperties,
};

use crate::{error::Result, segment::TrackPath};

pub fn save_paths(paths: &[TrackPath], file_path: &Path) -> Result<usize> {
    let file = File::create(file_path)?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("path", DataType::UInt32, false),
        Field::new("storm_id", DataType::Int64, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Second, None),
            false,
        ),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("latitude_hemisphere", DataType::Utf8, false),
        Field::new("longitude_hemisphere", DataType::Utf8, false),
    ]));

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .set_dictionary_enabled(true)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let num_rows: usize = paths.iter().map(TrackPath::len).sum();

    let mut path_indices = Vec::with_capacity(num_rows);
    let mut storm_ids = Vec::with_capacity(num_rows);
    let mut timestamps = Vec::with_capacity(num_rows);
    let mut latitudes = Vec::with_capacity(num_rows);
    let mut longitudes = Vec::with_capacity(num_rows);
    let mut latitude_hemispheres = Vec::with_capacity(num_rows);
    let mut longitude_hemispheres = Vec::with_capacity(num_rows);

    for (idx, path) in paths.iter().enumerate() {
        for p in path.points() {
            path_indices.push(idx as u32);
            storm_ids.push(p.storm_id());
            timestamps.push(p.timestamp().and_utc().timestamp());
            latitudes.push(p.latitude().signed_degrees());
            longitudes.push(p.longitude().signed_degrees());
            latitude_hemispheres.push(p.latitude().hemisphere().code().to_string());
            longitude_hemispheres.push(p.longitude().hemisphere().code().to_string());
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(path_indices)),
        Arc::new(Int64Array::from(storm_ids)),
        Arc::new(TimestampSecondArray::from(timestamps)),
        Arc::new(Float64Array::from(latitudes)),
        Arc::new(Float64Array::from(longitudes)),
        Arc::new(StringArray::from(latitude_hemispheres)),
        Arc::new(StringArray::from(longitude_hemispheres)),
    ];

    // an empty export still gets a valid file with the schema
    if num_rows > 0 {
        let batch = RecordBatch::try_new(schema, columns)?;
        writer.write(&batch)?;
    }

    writer.close()?;

    Ok(num_rows)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::fs;

    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{observation::ObservationPoint, segment::segment};

    fn paths_fixture() -> Vec<TrackPath> {
        let lines = [
            "SH, 01, 1999090100, , BEST, 0, 78S, 1523W",
            "SH, 01, 1999090106, , BEST, 0, 81S, 1519W",
            "SH, 02, 1999090112, , BEST, 0, 152N, 1301E",
        ];
        let points = lines
            .iter()
            .map(|l| ObservationPoint::from_line(l).unwrap())
            .collect();

        segment(points)
    }

    #[test]
    fn should_write_one_row_per_fix() {
        let paths = paths_fixture();
        let temp_file = NamedTempFile::new().unwrap();

        let rows = save_paths(&paths, temp_file.path()).unwrap();
        assert_eq!(rows, 3);

        let file = fs::File::open(temp_file.path()).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();

        let mut total_rows = 0;
        for batch_result in reader {
            let batch = batch_result.unwrap();
            total_rows += batch.num_rows();

            let schema = batch.schema();
            assert_eq!(schema.fields().len(), 7);
            assert_eq!(schema.field(0).name(), "path");
            assert_eq!(schema.field(3).name(), "latitude");

            let path_array = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .unwrap();
            assert_eq!(path_array.values().to_vec(), vec![0, 0, 1]);

            let lat_array = batch
                .column(3)
                .as_any()
                .downcast_ref::<Float64Array>()
                .unwrap();
            assert_eq!(lat_array.value(0), -7.8);
            assert_eq!(lat_array.value(2), 15.2);
            assert_eq!(lat_array.null_count(), 0);

            let hemisphere_array = batch
                .column(6)
                .as_any()
                .downcast_ref::<StringArray>()
                .unwrap();
            assert_eq!(hemisphere_array.value(0), "W");
        }

        assert_eq!(total_rows, 3);
    }

    #[test]
    fn should_write_schema_for_empty_export() {
        let temp_file = NamedTempFile::new().unwrap();

        assert_eq!(save_paths(&[], temp_file.path()).unwrap(), 0);

        let file = fs::File::open(temp_file.path()).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        assert_eq!(builder.schema().fields().len(), 7);
        assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
    }
}
