use std::fmt;

/// Activation shape without the batch axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Spatial {
        height: usize,
        width: usize,
        channels: usize,
    },
    Flat(usize),
}

impl Shape {
    pub fn element_count(&self) -> usize {
        match *self {
            Shape::Spatial {
                height,
                width,
                channels,
            } => height * width * channels,
            Shape::Flat(n) => n,
        }
    }

    pub fn channels(&self) -> usize {
        match *self {
            Shape::Spatial { channels, .. } => channels,
            Shape::Flat(n) => n,
        }
    }

    /// NHWC / NC dims with a leading batch axis of 1.
    pub fn with_batch(&self) -> Vec<usize> {
        match *self {
            Shape::Spatial {
                height,
                width,
                channels,
            } => vec![1, height, width, channels],
            Shape::Flat(n) => vec![1, n],
        }
    }

    fn as_spatial(&self) -> (usize, usize, usize) {
        match *self {
            Shape::Spatial {
                height,
                width,
                channels,
            } => (height, width, channels),
            Shape::Flat(n) => (1, 1, n),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Spatial {
                height,
                width,
                channels,
            } => write!(f, "({}, {}, {})", height, width, channels),
            Shape::Flat(n) => write!(f, "({})", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layer {
    /// Stride 1, "same" padding, with bias.
    Conv2d { filters: usize, kernel: usize },
    /// Per-channel scale, shift, moving mean and moving variance.
    BatchNorm,
    Relu,
    /// Non-overlapping window, floor on odd sizes.
    MaxPool { size: usize },
    Dropout { rate: f32 },
    GlobalAveragePool,
    /// Fully connected with bias. Spatial input is flattened first.
    Dense { units: usize },
    Softmax,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterCount {
    pub trainable: usize,
    pub non_trainable: usize,
}

impl ParameterCount {
    pub fn total(&self) -> usize {
        self.trainable + self.non_trainable
    }
}

impl std::ops::Add for ParameterCount {
    type Output = ParameterCount;

    fn add(self, other: ParameterCount) -> ParameterCount {
        ParameterCount {
            trainable: self.trainable + other.trainable,
            non_trainable: self.non_trainable + other.non_trainable,
        }
    }
}

impl Layer {
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Conv2d { .. } => "conv2d",
            Layer::BatchNorm => "batch_norm",
            Layer::Relu => "relu",
            Layer::MaxPool { .. } => "max_pool",
            Layer::Dropout { .. } => "dropout",
            Layer::GlobalAveragePool => "global_average_pool",
            Layer::Dense { .. } => "dense",
            Layer::Softmax => "softmax",
        }
    }

    /// Dropout only acts during training.
    pub fn is_inference_op(&self) -> bool {
        !matches!(self, Layer::Dropout { .. })
    }

    pub fn output_shape(&self, input: Shape) -> Shape {
        match *self {
            Layer::Conv2d { filters, .. } => {
                let (height, width, _) = input.as_spatial();
                Shape::Spatial {
                    height,
                    width,
                    channels: filters,
                }
            }
            Layer::MaxPool { size } => {
                let (height, width, channels) = input.as_spatial();
                Shape::Spatial {
                    height: height / size,
                    width: width / size,
                    channels,
                }
            }
            Layer::GlobalAveragePool => Shape::Flat(input.channels()),
            Layer::Dense { units } => Shape::Flat(units),
            Layer::BatchNorm | Layer::Relu | Layer::Dropout { .. } | Layer::Softmax => input,
        }
    }

    pub fn parameters(&self, input: Shape) -> ParameterCount {
        match *self {
            Layer::Conv2d { filters, kernel } => ParameterCount {
                trainable: kernel * kernel * input.channels() * filters + filters,
                non_trainable: 0,
            },
            Layer::BatchNorm => ParameterCount {
                trainable: 2 * input.channels(),
                non_trainable: 2 * input.channels(),
            },
            Layer::Dense { units } => ParameterCount {
                trainable: input.element_count() * units + units,
                non_trainable: 0,
            },
            _ => ParameterCount::default(),
        }
    }
}
