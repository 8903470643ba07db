#[cfg(test)]
mod tests {
    use mapty::libs::export::{ExportFormat, Exporter};
    use mapty::libs::store::Workouts;
    use mapty::libs::workout::{Coords, Workout};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        workouts: Workouts,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let run = Workout::running(Coords::new(40.7, -73.9), 5.0, 30.0, 150.0);
            let mut ride = Workout::cycling(Coords::new(41.0, -74.0), 20.0, 60.0, 300.0);
            ride.id = run.id.successor();

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                workouts: Workouts::from(vec![run, ride]),
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("workouts.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()));
        exporter.export(&ctx.workouts).unwrap();

        let mut reader = csv::Reader::from_path(&output_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[1], "type");

        let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
        assert_eq!(rows.len(), 2);

        let column = |name: &str| headers.iter().position(|header| header == name).unwrap();
        assert_eq!(&rows[0][column("type")], "running");
        assert_eq!(&rows[0][column("pace_min_per_km")], "6.0");
        assert_eq!(&rows[0][column("speed_km_per_h")], "");
        assert_eq!(&rows[1][column("type")], "cycling");
        assert_eq!(&rows[1][column("speed_km_per_h")], "20.0");
        assert_eq!(&rows[1][column("cadence_spm")], "");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("workouts.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(output_path.clone()));
        exporter.export(&ctx.workouts).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let restored = Workouts::from_json(&content);
        assert_eq!(restored, ctx.workouts);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_empty(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("empty.json");
        Exporter::new(ExportFormat::Json, Some(output_path.clone())).export(&Workouts::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "[]");
    }

    #[test]
    fn test_default_file_name() {
        let exporter = Exporter::new(ExportFormat::Csv, None);
        let name = exporter.output_path().to_string_lossy().to_string();

        assert!(name.starts_with("mapty_export_"));
        assert!(name.ends_with(".csv"));
    }
}
