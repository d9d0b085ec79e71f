use plotters::coord::Shift;
use plotters::prelude::*;

use crate::evaluation::ConfusionMatrix;

/// Benign/malignant counts, expected on the y axis and predicted on the x axis.
pub fn plot_confusion_matrix<DB>(
    matrix: &ConfusionMatrix,
    category_formatter: &impl Fn(usize) -> String,
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    const CAT_CNT: usize = 2;

    drawing_area.fill(&WHITE)?;

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder
        .caption(caption, ("Arial", 20))
        .set_all_label_area_size(50)
        .margin(50)
        .build_cartesian_2d(
            (0..CAT_CNT - 1).into_segmented(),
            (0..CAT_CNT - 1).into_segmented(),
        )?;

    let label_formatter = |idx: &SegmentValue<usize>| match *idx {
        SegmentValue::Exact(v) => category_formatter(v),
        SegmentValue::CenterOf(v) => category_formatter(v),
        SegmentValue::Last => "N/A".to_string(),
    };
    chart_context
        .configure_mesh()
        .light_line_style(WHITE)
        .x_labels(CAT_CNT)
        .x_desc("Predicted")
        .x_label_formatter(&label_formatter)
        .y_labels(CAT_CNT)
        .y_desc("Expected")
        .y_label_formatter(&label_formatter)
        .draw()?;

    // [expected][predicted]
    let counts = [
        [matrix.true_negative, matrix.false_positive],
        [matrix.false_negative, matrix.true_positive],
    ];

    let max = counts.iter().flatten().copied().max().unwrap_or(0).max(1) as f64;

    chart_context.draw_series(counts.iter().enumerate().flat_map(|(expected, row)| {
        row.iter().enumerate().map(move |(predicted, &count)| {
            Rectangle::new(
                [
                    (
                        SegmentValue::Exact(predicted),
                        SegmentValue::Exact(expected),
                    ),
                    (
                        SegmentValue::Exact(predicted + 1),
                        SegmentValue::Exact(expected + 1),
                    ),
                ],
                BLACK.mix(count as f64 / max).filled(),
            )
        })
    }))?;

    Ok(())
}

/// Cost per iteration on a logarithmic y axis.
pub fn plot_log_scale_data<DB>(
    data: &[f64],
    label: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let Some(MinMax { min, max }) = find_max_min(data.iter().copied().filter(|&v| v > 0.)) else {
        return Ok(());
    };

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder
        .caption(label, ("Arial", 20))
        .set_all_label_area_size(70)
        .margin(50)
        .build_cartesian_2d(0..data.len(), (min..max * 1.1).log_scale())?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Iteration")
        .y_labels(10)
        .y_desc(label)
        .y_label_formatter(&|y| format!("{:.1e}", y))
        .draw()?;

    let costs = LineSeries::new(
        data.iter().enumerate().map(|(i, &c)| (i, c)),
        BLUE.filled(),
    );

    chart_context.draw_series(costs)?;

    Ok(())
}

/// Predicted against actual values with the identity line for reference.
pub fn plot_predictions<DB>(
    actual: &[f64],
    predicted: &[f64],
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let Some(MinMax { min, max }) = find_max_min(actual.iter().chain(predicted).copied()) else {
        return Ok(());
    };

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder
        .caption(caption, ("Arial", 20))
        .set_all_label_area_size(70)
        .margin(50)
        .build_cartesian_2d(min..max, min..max)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("actual")
        .y_labels(10)
        .y_desc("predicted")
        .draw()?;

    chart_context.draw_series(LineSeries::new([(min, min), (max, max)], &GREEN))?;

    chart_context.draw_series(
        actual
            .iter()
            .zip(predicted)
            .map(|(&a, &p)| Circle::new((a, p), 2, RED.filled())),
    )?;

    Ok(())
}

pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

pub fn find_max_min<T: std::cmp::PartialOrd + Copy>(
    mut data: impl Iterator<Item = T>,
) -> Option<MinMax<T>> {
    let init = data.next()?;
    let mut min_max = MinMax {
        min: init,
        max: init,
    };

    for x in data {
        min_max = MinMax {
            min: if x < min_max.min { x } else { min_max.min },
            max: if x > min_max.max { x } else { min_max.max },
        };
    }

    Some(min_max)
}
