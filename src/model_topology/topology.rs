use crate::image_classifier::interface::Emotion;
use crate::model_topology::layer::{Layer, ParameterCount, Shape};
use crate::region_preprocessor::face_tensor::FACE_SIZE;
use std::fmt;

const STAGE_WIDTHS: [usize; 4] = [32, 64, 128, 256];
const STAGE_DROPOUT: f32 = 0.25;
const HIDDEN_UNITS: usize = 128;
const HIDDEN_DROPOUT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelTopology {
    input: Shape,
    layers: Vec<Layer>,
}

impl ModelTopology {
    pub fn new(input: Shape, layers: Vec<Layer>) -> Self {
        Self { input, layers }
    }

    /// Four conv stages (32, 64, 128, 256 channels), each conv, batch norm,
    /// relu, 2x2 max pool and dropout 0.25; global average pooling; a
    /// 128-unit dense block with batch norm and dropout 0.5; softmax over
    /// the seven emotions.
    pub fn emotion_cnn() -> Self {
        let mut layers = Vec::new();

        for filters in STAGE_WIDTHS {
            layers.push(Layer::Conv2d { filters, kernel: 3 });
            layers.push(Layer::BatchNorm);
            layers.push(Layer::Relu);
            layers.push(Layer::MaxPool { size: 2 });
            layers.push(Layer::Dropout {
                rate: STAGE_DROPOUT,
            });
        }

        layers.push(Layer::GlobalAveragePool);
        layers.push(Layer::Dense {
            units: HIDDEN_UNITS,
        });
        layers.push(Layer::Relu);
        layers.push(Layer::BatchNorm);
        layers.push(Layer::Dropout {
            rate: HIDDEN_DROPOUT,
        });
        layers.push(Layer::Dense {
            units: Emotion::ALL.len(),
        });
        layers.push(Layer::Softmax);

        Self::new(
            Shape::Spatial {
                height: FACE_SIZE as usize,
                width: FACE_SIZE as usize,
                channels: 1,
            },
            layers,
        )
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The op sequence an inference engine must execute.
    pub fn inference_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.is_inference_op())
    }

    /// Output shape of every layer, in order.
    pub fn layer_shapes(&self) -> Vec<Shape> {
        self.layers
            .iter()
            .scan(self.input, |shape, layer| {
                *shape = layer.output_shape(*shape);
                Some(*shape)
            })
            .collect()
    }

    pub fn input_shape(&self) -> Vec<usize> {
        self.input.with_batch()
    }

    pub fn output_shape(&self) -> Vec<usize> {
        self.layer_shapes()
            .last()
            .copied()
            .unwrap_or(self.input)
            .with_batch()
    }

    pub fn parameter_count(&self) -> ParameterCount {
        let mut shape = self.input;
        let mut count = ParameterCount::default();

        for layer in &self.layers {
            count = count + layer.parameters(shape);
            shape = layer.output_shape(shape);
        }

        count
    }
}

fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

impl fmt::Display for ModelTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}{:<20}{:>10}", "Layer", "Output Shape", "Params")?;

        let mut shape = self.input;
        for layer in &self.layers {
            let params = layer.parameters(shape).total();
            shape = layer.output_shape(shape);
            writeln!(
                f,
                "{:<24}{:<20}{:>10}",
                layer.name(),
                shape.to_string(),
                with_thousands(params)
            )?;
        }

        let count = self.parameter_count();
        writeln!(f, "Total params: {}", with_thousands(count.total()))?;
        writeln!(f, "Trainable params: {}", with_thousands(count.trainable))?;
        write!(
            f,
            "Non-trainable params: {}",
            with_thousands(count.non_trainable)
        )
    }
}
